//! JSON request bodies checked before they reach a handler.
//!
//! Bodies are small (a role, a four-digit string, credentials), so reading
//! stops at [`MAX_BODY_BYTES`]. Malformed JSON is `BAD_REQUEST`; a required
//! field that is absent or blank fails with the matching `INVALID_*` code.
//! Whether a present value is well formed is still decided by the services.

use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::future::LocalBoxFuture;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::debug;

use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;

pub const MAX_BODY_BYTES: usize = 4 * 1024;

/// A request body with required fields.
pub trait RequestBody: DeserializeOwned {
    /// Reject absent or blank required fields, first failure wins.
    fn check(&self) -> Result<(), DomainError>;
}

/// Fail with `kind` when `value` is empty after trimming.
pub fn require(field: &str, value: &str, kind: ValidationKind) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid(kind, format!("Field '{field}' is required")));
    }
    Ok(())
}

#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: RequestBody + 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let route = req
            .match_pattern()
            .unwrap_or_else(|| req.path().to_string());

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    debug!(route = %route, error = %e, "request body read failed");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        format!("Request body exceeds {MAX_BODY_BYTES} bytes"),
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            let value = serde_json::from_slice::<T>(&body).map_err(|e| {
                debug!(
                    route = %route,
                    error = %Redacted(&e.to_string()),
                    body_size = body.len(),
                    "request body rejected"
                );
                AppError::bad_request(ErrorCode::BadRequest, describe(&e))
            })?;
            value.check()?;
            Ok(ValidatedJson(value))
        })
    }
}

/// Client-facing summary; never echoes body content.
fn describe(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", error.line()),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        Category::Data => "Invalid JSON: a field has the wrong type".to_string(),
        Category::Io => "Invalid JSON: body could not be read".to_string(),
    }
}
