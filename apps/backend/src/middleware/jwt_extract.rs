//! Bearer token verification for the protected `/api` scope.
//!
//! On success the verified `BackendClaims` are stored in request extensions
//! for the extractors. On failure the request is answered right here with a
//! 401 problem-details response; handlers never run.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::auth::claims::BackendClaims;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(err) => {
                debug!(code = %err.code(), path = %req.path(), "rejected request");
                // Rendered inside the future so the trace scope is active
                Box::pin(async move {
                    let response = err.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                })
            }
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<BackendClaims, AppError> {
    let token = extract_bearer_from_header(req.headers().get(header::AUTHORIZATION))?;
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    let claims = verify_access_token(&token, &state.security)?;
    BackendClaims::try_from(claims)
}

/// Accepts exactly `Bearer <token>`.
pub fn extract_bearer_from_header(header_value: Option<&HeaderValue>) -> Result<String, AppError> {
    let Some(value) = header_value else {
        return Err(AppError::unauthorized_missing_bearer());
    };
    let raw = value
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}
