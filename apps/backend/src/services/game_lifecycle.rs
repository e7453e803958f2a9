//! Game lifecycle: start, join, set code, guess, stop and get.
//!
//! Every mutation runs the same validate-then-commit step:
//! parse input, load the session, authorize, check state, then mutate and
//! save with a version check. The step runs under the per-game mutex and is
//! retried from a fresh load when another process won the version race.
//! The mutex entry is dropped as soon as no request holds or awaits it.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::code::FourDigits;
use crate::domain::policy;
use crate::domain::session::{GameSession, NewSession, PendingGuess};
use crate::entities::{GameStatus, GameType, Role};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::games::GameStore;
use crate::repos::users::{UserProfile, UserStore};
use crate::services::session_locks::SessionLocks;

/// Attempts per mutation before a version conflict is surfaced to the caller.
pub const MAX_COMMIT_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessView {
    pub guess: String,
    pub cows: u8,
    pub bulls: u8,
}

/// Public view of a session. The secret code is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: i64,
    pub game_type: GameType,
    pub status: GameStatus,
    pub turn: Role,
    pub guesser: Option<UserProfile>,
    pub mastermind: Option<UserProfile>,
    pub guesses: Vec<GuessView>,
}

pub struct GameLifecycle {
    games: Arc<dyn GameStore>,
    users: Arc<dyn UserStore>,
    locks: SessionLocks,
}

impl GameLifecycle {
    pub fn new(games: Arc<dyn GameStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            games,
            users,
            locks: SessionLocks::new(),
        }
    }

    pub fn locks(&self) -> &SessionLocks {
        &self.locks
    }

    /// Create a WAITING session with the caller bound to `role`.
    pub async fn start(
        &self,
        caller: i64,
        game_type: &str,
        role: &str,
    ) -> Result<SessionView, DomainError> {
        let game_type: GameType = game_type.parse()?;
        if game_type == GameType::VsComputer {
            return Err(DomainError::invalid(
                ValidationKind::GameType,
                "VS_COMPUTER games cannot be started",
            ));
        }
        let role: Role = role.parse()?;

        let session = self
            .games
            .create_session(NewSession {
                game_type,
                creator_id: caller,
                role,
            })
            .await?;
        info!(game_id = session.id, user_id = caller, ?game_type, ?role, "game created");
        self.view(session).await
    }

    /// Bind the caller to the open `role` slot; the game moves to STARTED.
    pub async fn join(
        &self,
        caller: i64,
        game_id: i64,
        role: &str,
    ) -> Result<SessionView, DomainError> {
        let role: Role = role.parse()?;
        let session = self
            .commit(game_id, |session| {
                session.bind(caller, role)?;
                Ok(None)
            })
            .await?;
        info!(game_id, user_id = caller, ?role, "player joined");
        self.view(session).await
    }

    pub async fn set_code(
        &self,
        caller: i64,
        game_id: i64,
        code: &str,
    ) -> Result<SessionView, DomainError> {
        let code = FourDigits::parse_code(code)?;
        let session = self
            .commit(game_id, |session| {
                policy::ensure_can_set_code(session, caller)?;
                session.set_code(code)?;
                Ok(None)
            })
            .await?;
        info!(game_id, user_id = caller, "code set");
        self.view(session).await
    }

    /// Score and append a guess. Four bulls finishes the game.
    pub async fn guess(
        &self,
        caller: i64,
        game_id: i64,
        guess: &str,
    ) -> Result<SessionView, DomainError> {
        let guess = FourDigits::parse_guess(guess)?;
        let session = self
            .commit(game_id, |session| {
                policy::ensure_can_guess(session, caller)?;
                session.record_guess(guess).map(Some)
            })
            .await?;
        info!(
            game_id,
            user_id = caller,
            finished = session.is_finished(),
            "guess recorded"
        );
        self.view(session).await
    }

    pub async fn stop(&self, caller: i64, game_id: i64) -> Result<SessionView, DomainError> {
        let session = self
            .commit(game_id, |session| {
                policy::ensure_can_stop(session, caller)?;
                session.finish()?;
                Ok(None)
            })
            .await?;
        info!(game_id, user_id = caller, "game stopped");
        self.view(session).await
    }

    /// Snapshot read; does not take the game mutex.
    pub async fn get(&self, game_id: i64) -> Result<SessionView, DomainError> {
        let session = self.load(game_id).await?;
        self.view(session).await
    }

    async fn load(&self, game_id: i64) -> Result<GameSession, DomainError> {
        self.games
            .find_session(game_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
            })
    }

    /// Run `step` against a freshly loaded session and save the result.
    ///
    /// `step` performs authorization and state checks and returns the guess to
    /// append, if any. Nothing is written when it fails.
    async fn commit<F>(&self, game_id: i64, step: F) -> Result<GameSession, DomainError>
    where
        F: Fn(&mut GameSession) -> Result<Option<PendingGuess>, DomainError>,
    {
        let _guard = self.locks.acquire(game_id).await;

        let mut attempt = 1;
        loop {
            let mut session = self.load(game_id).await?;
            let expected_version = session.version;
            let appended = step(&mut session)?;

            match self
                .games
                .save_session(&session, expected_version, appended)
                .await
            {
                Ok(saved) => return Ok(saved),
                Err(err) if err.is_optimistic_lock() && attempt < MAX_COMMIT_ATTEMPTS => {
                    warn!(game_id, attempt, "version conflict, reloading game");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn profile(&self, user_id: Option<i64>) -> Result<Option<UserProfile>, DomainError> {
        match user_id {
            Some(id) => self.users.find_profile(id).await,
            None => Ok(None),
        }
    }

    async fn view(&self, session: GameSession) -> Result<SessionView, DomainError> {
        let guesser = self.profile(session.guesser_id).await?;
        let mastermind = self.profile(session.mastermind_id).await?;
        Ok(SessionView {
            id: session.id,
            game_type: session.game_type,
            status: session.status,
            turn: session.turn,
            guesser,
            mastermind,
            guesses: session
                .guesses
                .iter()
                .map(|g| GuessView {
                    guess: g.guess.to_string(),
                    cows: g.score.cows,
                    bulls: g.score.bulls,
                })
                .collect(),
        })
    }
}
