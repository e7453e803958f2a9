//! DTOs for games_sea adapter.

use crate::domain::code::FourDigits;
use crate::domain::scoring::Score;
use crate::domain::session::{GameSession, Guess, NewSession, PendingGuess};
use crate::entities::{games, guesses, GameStatus, GameType, Role};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

/// DTO for creating a new WAITING game.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub game_type: GameType,
    pub guesser_id: Option<i64>,
    pub mastermind_id: Option<i64>,
}

impl From<NewSession> for GameCreate {
    fn from(new: NewSession) -> Self {
        Self {
            game_type: new.game_type,
            guesser_id: new.guesser_id(),
            mastermind_id: new.mastermind_id(),
        }
    }
}

/// Full write of a session's mutable columns, guarded by `expected_version`.
#[derive(Debug, Clone)]
pub struct GameUpdate {
    pub id: i64,
    pub status: GameStatus,
    pub turn: Role,
    pub guesser_id: Option<i64>,
    pub mastermind_id: Option<i64>,
    pub code: Option<String>,
    pub expected_version: i32,
}

impl GameUpdate {
    pub fn from_session(session: &GameSession, expected_version: i32) -> Self {
        Self {
            id: session.id,
            status: session.status,
            turn: session.turn,
            guesser_id: session.guesser_id,
            mastermind_id: session.mastermind_id,
            code: session.code.map(|c| c.to_string()),
            expected_version,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GuessCreate {
    pub game_id: i64,
    pub guess: String,
    pub cows: i16,
    pub bulls: i16,
}

impl GuessCreate {
    pub fn new(game_id: i64, pending: PendingGuess) -> Self {
        Self {
            game_id,
            guess: pending.guess.to_string(),
            cows: i16::from(pending.score.cows),
            bulls: i16::from(pending.score.bulls),
        }
    }
}

fn corrupt(game_id: i64, what: &str) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("Game {game_id} has an invalid stored {what}"),
    )
}

fn stored_digits(game_id: i64, raw: &str, what: &str) -> Result<FourDigits, DomainError> {
    FourDigits::parse(raw, ValidationKind::Other(what.to_string()))
        .map_err(|_| corrupt(game_id, what))
}

fn stored_count(game_id: i64, raw: i16) -> Result<u8, DomainError> {
    u8::try_from(raw).map_err(|_| corrupt(game_id, "score"))
}

/// Assemble the domain session from a game row and its guess rows.
pub fn to_session(
    game: games::Model,
    rows: Vec<guesses::Model>,
) -> Result<GameSession, DomainError> {
    let code = game
        .code
        .as_deref()
        .map(|raw| stored_digits(game.id, raw, "code"))
        .transpose()?;

    let guesses = rows
        .into_iter()
        .map(|row| {
            Ok(Guess {
                id: row.id,
                guess: stored_digits(game.id, &row.guess, "guess")?,
                score: Score {
                    cows: stored_count(game.id, row.cows)?,
                    bulls: stored_count(game.id, row.bulls)?,
                },
                created_at: row.created_at,
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    Ok(GameSession {
        id: game.id,
        game_type: game.game_type,
        status: game.status,
        turn: game.turn,
        guesser_id: game.guesser_id,
        mastermind_id: game.mastermind_id,
        code,
        guesses,
        version: game.version,
        created_at: game.created_at,
        updated_at: game.updated_at,
    })
}
