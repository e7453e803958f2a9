use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use super::current_user::CurrentUser;
use crate::domain::policy;
use crate::error::AppError;

/// A `CurrentUser` whose role is ADMIN.
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let user = CurrentUser::from_request(req, payload);

        Box::pin(async move {
            let user = user.await?;
            policy::ensure_can_administer(user.role)?;
            Ok(AdminUser(user))
        })
    }
}
