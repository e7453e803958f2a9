use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::info;

use super::auth::MessageResponse;
use crate::entities::UserRole;
use crate::error::AppError;
use crate::extractors::{AdminUser, CurrentUser};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct UserSummary {
    username: String,
    role: UserRole,
}

#[derive(Debug, Serialize)]
struct UsersResponse {
    users: Vec<UserSummary>,
}

async fn hello(_user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Hello, world!".to_string(),
    }))
}

async fn dashboard(_admin: AdminUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Welcome to the admin dashboard!".to_string(),
    }))
}

async fn list_users(
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = app_state
        .accounts
        .list()
        .await?
        .into_iter()
        .map(|u| UserSummary {
            username: u.username,
            role: u.role,
        })
        .collect();

    Ok(HttpResponse::Ok().json(UsersResponse { users }))
}

async fn delete_user(
    AdminUser(admin): AdminUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();
    app_state.accounts.delete(&username).await?;
    info!(admin_id = admin.id, "user removed by admin");

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("User '{username}' deleted"),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/hello", web::get().to(hello))
        .route("/dashboard", web::get().to(dashboard))
        .route("/users", web::get().to(list_users))
        .route("/user/delete/{username}", web::delete().to(delete_user));
}
