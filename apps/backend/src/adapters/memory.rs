//! Process-local stores used with `BACKEND_DB=memory` and in tests.
//!
//! Both honor the same contracts as the SeaORM adapters: ids are assigned
//! monotonically, usernames are unique and session writes are version-checked.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use time::OffsetDateTime;

use crate::domain::session::{GameSession, Guess, NewSession, PendingGuess};
use crate::entities::{GameStatus, Role, UserRole};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::games::GameStore;
use crate::repos::users::{UserRecord, UserStore};

#[derive(Debug, Default)]
pub struct MemoryGames {
    next_game_id: AtomicI64,
    next_guess_id: AtomicI64,
    sessions: RwLock<HashMap<i64, GameSession>>,
}

impl MemoryGames {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for MemoryGames {
    async fn create_session(&self, new: NewSession) -> Result<GameSession, DomainError> {
        let now = OffsetDateTime::now_utc();
        let session = GameSession {
            id: self.next_game_id.fetch_add(1, Ordering::SeqCst) + 1,
            game_type: new.game_type,
            status: GameStatus::Waiting,
            turn: Role::Mastermind,
            guesser_id: new.guesser_id(),
            mastermind_id: new.mastermind_id(),
            code: None,
            guesses: Vec::new(),
            version: 1,
            created_at: now,
            updated_at: now,
        };
        self.sessions.write().insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_session(&self, game_id: i64) -> Result<Option<GameSession>, DomainError> {
        Ok(self.sessions.read().get(&game_id).cloned())
    }

    async fn save_session(
        &self,
        session: &GameSession,
        expected_version: i32,
        appended: Option<PendingGuess>,
    ) -> Result<GameSession, DomainError> {
        let mut sessions = self.sessions.write();
        let stored = sessions.get_mut(&session.id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("Game {} not found", session.id))
        })?;

        if stored.version != expected_version {
            return Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!(
                    "Game was modified concurrently (expected version {expected_version}, actual version {})",
                    stored.version
                ),
            ));
        }

        let now = OffsetDateTime::now_utc();
        stored.status = session.status;
        stored.turn = session.turn;
        stored.guesser_id = session.guesser_id;
        stored.mastermind_id = session.mastermind_id;
        stored.code = session.code;
        stored.version = expected_version + 1;
        stored.updated_at = now;
        if let Some(pending) = appended {
            stored.guesses.push(Guess {
                id: self.next_guess_id.fetch_add(1, Ordering::SeqCst) + 1,
                guess: pending.guess,
                score: pending.score,
                created_at: now,
            });
        }
        Ok(stored.clone())
    }
}

#[derive(Debug, Default)]
pub struct MemoryUsers {
    next_user_id: AtomicI64,
    users: RwLock<BTreeMap<i64, UserRecord>>,
}

impl MemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<UserRecord, DomainError> {
        let mut users = self.users.write();
        if users.values().any(|u| u.username == username) {
            return Err(DomainError::conflict(
                ConflictKind::UniqueUsername,
                "Username already taken",
            ));
        }
        let user = UserRecord {
            id: self.next_user_id.fetch_add(1, Ordering::SeqCst) + 1,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, DomainError> {
        Ok(self.users.read().get(&user_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DomainError> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, DomainError> {
        Ok(self.users.read().values().cloned().collect())
    }

    async fn update_password_hash(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write();
        let Some(user) = users.get_mut(&user_id) else {
            return Ok(false);
        };
        user.password_hash = password_hash.to_string();
        Ok(true)
    }

    async fn delete_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let mut users = self.users.write();
        let before = users.len();
        users.retain(|_, u| u.username != username);
        Ok(users.len() < before)
    }
}
