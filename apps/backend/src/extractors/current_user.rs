use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;
use tracing::warn;

use crate::auth::claims::BackendClaims;
use crate::entities::UserRole;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// The authenticated caller, re-read from the user store on every request.
///
/// Relies on `JwtExtract` having stored `BackendClaims` in request
/// extensions. A token whose user has since been deleted is rejected with
/// `FORBIDDEN_USER_NOT_FOUND`.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let claims = req
                .extensions()
                .get::<BackendClaims>()
                .cloned()
                .ok_or_else(AppError::unauthorized)?;

            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let Some(user) = state.users.find_by_id(claims.user_id).await? else {
                warn!(user_id = claims.user_id, "token for unknown user");
                return Err(AppError::forbidden_user_not_found());
            };

            Ok(CurrentUser {
                id: user.id,
                username: user.username,
                role: user.role,
            })
        })
    }
}
