//! Authorization predicates for game transitions.
//!
//! These checks depend only on who the caller is relative to the session, never
//! on the game state, so a rejected caller always sees `Forbidden`.

use crate::domain::session::GameSession;
use crate::entities::{GameType, UserRole};
use crate::errors::domain::{DomainError, ForbiddenKind};

pub fn can_set_code(session: &GameSession, caller: i64) -> bool {
    session.mastermind_id == Some(caller)
}

/// In multiplayer games only the bound guesser may guess; other game types are
/// open to any caller.
pub fn can_guess(session: &GameSession, caller: i64) -> bool {
    session.game_type != GameType::Multiplayer || session.guesser_id == Some(caller)
}

pub fn can_stop(session: &GameSession, caller: i64) -> bool {
    session.is_participant(caller)
}

pub fn can_administer(role: UserRole) -> bool {
    role == UserRole::Admin
}

pub fn ensure_can_administer(role: UserRole) -> Result<(), DomainError> {
    if can_administer(role) {
        return Ok(());
    }
    Err(DomainError::forbidden(
        ForbiddenKind::AdminRequired,
        "Administrator role required",
    ))
}

pub fn ensure_can_set_code(session: &GameSession, caller: i64) -> Result<(), DomainError> {
    if can_set_code(session, caller) {
        return Ok(());
    }
    Err(DomainError::forbidden(
        ForbiddenKind::NotMastermind,
        "Only the mastermind can set the code",
    ))
}

pub fn ensure_can_guess(session: &GameSession, caller: i64) -> Result<(), DomainError> {
    if can_guess(session, caller) {
        return Ok(());
    }
    Err(DomainError::forbidden(
        ForbiddenKind::NotGuesser,
        "Only the guesser can submit guesses",
    ))
}

pub fn ensure_can_stop(session: &GameSession, caller: i64) -> Result<(), DomainError> {
    if can_stop(session, caller) {
        return Ok(());
    }
    Err(DomainError::forbidden(
        ForbiddenKind::NotParticipant,
        "Only a participant can stop the game",
    ))
}
