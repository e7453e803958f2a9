use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::Serialize;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Positive game id taken from the `{game_id}` path segment.
///
/// Existence is checked by the lifecycle, which needs the row anyway.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct GameId(pub i64);

pub fn parse_game_id(raw: &str) -> Result<i64, AppError> {
    let game_id = raw.parse::<i64>().map_err(|_| {
        AppError::invalid(ErrorCode::InvalidGameId, format!("Invalid game id: {raw}"))
    })?;
    if game_id <= 0 {
        return Err(AppError::invalid(
            ErrorCode::InvalidGameId,
            format!("Game id must be positive, got: {game_id}"),
        ));
    }
    Ok(game_id)
}

impl FromRequest for GameId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("game_id") {
            Some(raw) => parse_game_id(raw).map(GameId),
            None => Err(AppError::invalid(
                ErrorCode::InvalidGameId,
                "Missing game_id parameter",
            )),
        };
        ready(result)
    }
}
