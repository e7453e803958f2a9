//! Game session model.
//!
//! `GameSession` holds the current truth about one game. Mutations enforce the
//! model invariants and are only invoked by the lifecycle service after the
//! caller has been authorized.

use time::OffsetDateTime;

use crate::domain::code::FourDigits;
use crate::domain::scoring::{score, Score};
use crate::entities::{GameStatus, GameType, Role};
use crate::errors::domain::{DomainError, StateKind};

/// A scored guess already persisted with its parent session.
#[derive(Debug, Clone, PartialEq)]
pub struct Guess {
    pub id: i64,
    pub guess: FourDigits,
    pub score: Score,
    pub created_at: OffsetDateTime,
}

/// A scored guess waiting to be appended by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingGuess {
    pub guess: FourDigits,
    pub score: Score,
}

/// Input for creating a session: the creator is bound to `role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSession {
    pub game_type: GameType,
    pub creator_id: i64,
    pub role: Role,
}

impl NewSession {
    pub fn guesser_id(&self) -> Option<i64> {
        (self.role == Role::Guesser).then_some(self.creator_id)
    }

    pub fn mastermind_id(&self) -> Option<i64> {
        (self.role == Role::Mastermind).then_some(self.creator_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub id: i64,
    pub game_type: GameType,
    pub status: GameStatus,
    pub turn: Role,
    pub guesser_id: Option<i64>,
    pub mastermind_id: Option<i64>,
    pub code: Option<FourDigits>,
    /// Submission order.
    pub guesses: Vec<Guess>,
    pub version: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl GameSession {
    pub fn slot(&self, role: Role) -> Option<i64> {
        match role {
            Role::Guesser => self.guesser_id,
            Role::Mastermind => self.mastermind_id,
        }
    }

    pub fn participant_role(&self, user_id: i64) -> Option<Role> {
        if self.mastermind_id == Some(user_id) {
            Some(Role::Mastermind)
        } else if self.guesser_id == Some(user_id) {
            Some(Role::Guesser)
        } else {
            None
        }
    }

    pub fn is_participant(&self, user_id: i64) -> bool {
        self.participant_role(user_id).is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    fn ensure_not_finished(&self) -> Result<(), DomainError> {
        if self.is_finished() {
            return Err(DomainError::invalid_state(
                StateKind::GameFinished,
                format!("Game {} is already finished", self.id),
            ));
        }
        Ok(())
    }

    fn advance(&mut self, next: GameStatus) {
        if next.rank() > self.status.rank() {
            self.status = next;
        }
    }

    /// Bind `user_id` to the unset `role` slot and start the game.
    pub fn bind(&mut self, user_id: i64, role: Role) -> Result<(), DomainError> {
        self.ensure_not_finished()?;
        if let Some(existing) = self.participant_role(user_id) {
            return Err(DomainError::invalid_state(
                StateKind::AlreadyJoined,
                format!("User is already the {existing:?} of game {}", self.id),
            ));
        }
        if self.slot(role).is_some() {
            return Err(DomainError::invalid_state(
                StateKind::RoleTaken,
                format!("Role {role:?} is already taken in game {}", self.id),
            ));
        }
        match role {
            Role::Guesser => self.guesser_id = Some(user_id),
            Role::Mastermind => self.mastermind_id = Some(user_id),
        }
        self.advance(GameStatus::Started);
        Ok(())
    }

    /// Set the secret code once and hand the turn to the guesser.
    pub fn set_code(&mut self, code: FourDigits) -> Result<(), DomainError> {
        self.ensure_not_finished()?;
        if self.code.is_some() {
            return Err(DomainError::invalid_state(
                StateKind::CodeAlreadySet,
                format!("Code for game {} is already set", self.id),
            ));
        }
        self.code = Some(code);
        self.turn = Role::Guesser;
        Ok(())
    }

    /// Score a guess. A winning guess finishes the game.
    ///
    /// The returned guess is not added to `guesses`; the store appends it when
    /// the session is saved.
    pub fn record_guess(&mut self, guess: FourDigits) -> Result<PendingGuess, DomainError> {
        self.ensure_not_finished()?;
        if self.status != GameStatus::Started {
            return Err(DomainError::invalid_state(
                StateKind::GameNotStarted,
                format!("Game {} has not started", self.id),
            ));
        }
        let Some(code) = self.code else {
            return Err(DomainError::invalid_state(
                StateKind::CodeNotSet,
                format!("Code for game {} has not been set", self.id),
            ));
        };
        let score = score(&guess, &code);
        if score.is_win() {
            self.advance(GameStatus::Finished);
        }
        Ok(PendingGuess { guess, score })
    }

    pub fn finish(&mut self) -> Result<(), DomainError> {
        self.ensure_not_finished()?;
        self.advance(GameStatus::Finished);
        Ok(())
    }
}
