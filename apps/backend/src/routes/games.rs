use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::extractors::{require, CurrentUser, GameId, RequestBody, ValidatedJson};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    #[serde(default)]
    pub game_type: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct CodeRequest {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    #[serde(default)]
    pub guess: String,
}

impl RequestBody for StartRequest {
    fn check(&self) -> Result<(), DomainError> {
        require("gameType", &self.game_type, ValidationKind::GameType)?;
        require("role", &self.role, ValidationKind::Role)
    }
}

impl RequestBody for JoinRequest {
    fn check(&self) -> Result<(), DomainError> {
        require("role", &self.role, ValidationKind::Role)
    }
}

impl RequestBody for CodeRequest {
    fn check(&self) -> Result<(), DomainError> {
        require("code", &self.code, ValidationKind::Code)
    }
}

impl RequestBody for GuessRequest {
    fn check(&self) -> Result<(), DomainError> {
        require("guess", &self.guess, ValidationKind::Guess)
    }
}

async fn start_game(
    user: CurrentUser,
    body: ValidatedJson<StartRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = app_state
        .lifecycle
        .start(user.id, &body.game_type, &body.role)
        .await?;
    Ok(HttpResponse::Created().json(view))
}

async fn get_game(
    _user: CurrentUser,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = app_state.lifecycle.get(game_id.0).await?;
    Ok(HttpResponse::Ok().json(view))
}

async fn join_game(
    user: CurrentUser,
    game_id: GameId,
    body: ValidatedJson<JoinRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = app_state
        .lifecycle
        .join(user.id, game_id.0, &body.role)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

async fn set_code(
    user: CurrentUser,
    game_id: GameId,
    body: ValidatedJson<CodeRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = app_state
        .lifecycle
        .set_code(user.id, game_id.0, &body.code)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

async fn submit_guess(
    user: CurrentUser,
    game_id: GameId,
    body: ValidatedJson<GuessRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = app_state
        .lifecycle
        .guess(user.id, game_id.0, &body.guess)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

async fn stop_game(
    user: CurrentUser,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = app_state.lifecycle.stop(user.id, game_id.0).await?;
    Ok(HttpResponse::Ok().json(view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(start_game))
        .route("/{game_id}", web::get().to(get_game))
        .route("/{game_id}/join", web::post().to(join_game))
        .route("/{game_id}/code", web::post().to(set_code))
        .route("/{game_id}/guess", web::post().to(submit_guess))
        .route("/{game_id}/stop", web::post().to(stop_game));
}
