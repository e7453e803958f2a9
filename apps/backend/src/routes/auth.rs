use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::extractors::{require, RequestBody, ValidatedJson};
use crate::state::app_state::AppState;

/// Missing fields deserialize as empty and are rejected before the handler.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl RequestBody for CredentialsRequest {
    fn check(&self) -> Result<(), DomainError> {
        require("username", &self.username, ValidationKind::Username)?;
        require("password", &self.password, ValidationKind::Password)
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

async fn register(
    body: ValidatedJson<CredentialsRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = app_state
        .accounts
        .register(&body.username, &body.password)
        .await?;

    Ok(HttpResponse::Created().json(MessageResponse {
        message: format!("User '{}' registered", user.username),
    }))
}

async fn login(
    body: ValidatedJson<CredentialsRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = app_state
        .accounts
        .login(&body.username, &body.password, &app_state.security)
        .await?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login));
}
