//! Game session persistence contract.

use async_trait::async_trait;

use crate::domain::session::{GameSession, NewSession, PendingGuess};
use crate::errors::domain::DomainError;

#[async_trait]
pub trait GameStore: Send + Sync {
    /// Persist a new WAITING session and return it with its assigned id.
    async fn create_session(&self, new: NewSession) -> Result<GameSession, DomainError>;

    /// Load a session with its guesses in submission order.
    async fn find_session(&self, game_id: i64) -> Result<Option<GameSession>, DomainError>;

    /// Write the session's mutable fields and append `appended` atomically.
    ///
    /// The write only applies while the stored version equals
    /// `expected_version`; otherwise `Conflict(OptimisticLock)` is returned and
    /// nothing changes. Returns the reloaded session.
    async fn save_session(
        &self,
        session: &GameSession,
        expected_version: i32,
        appended: Option<PendingGuess>,
    ) -> Result<GameSession, DomainError>;
}
