//! One `request_completed` event per request.
//!
//! The route is logged as its pattern (`/api/games/{game_id}/guess`) with the
//! game id and caller as separate fields, so events group by endpoint.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{Method, StatusCode};
use actix_web::{Error as ActixError, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::Level;

use crate::auth::claims::BackendClaims;
use crate::trace_ctx::UNKNOWN_TRACE_ID;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// What is known about a request once it has been routed and answered.
struct Completed {
    method: Method,
    route: String,
    game_id: Option<i64>,
    user_id: Option<i64>,
    status: StatusCode,
}

impl Completed {
    fn from_request(req: &HttpRequest, status: StatusCode) -> Self {
        Self {
            method: req.method().clone(),
            route: req
                .match_pattern()
                .unwrap_or_else(|| req.path().to_string()),
            game_id: req
                .match_info()
                .get("game_id")
                .and_then(|raw| raw.parse().ok()),
            user_id: req.extensions().get::<BackendClaims>().map(|c| c.user_id),
            status,
        }
    }

    fn level(&self) -> Level {
        if self.status.is_server_error() {
            Level::ERROR
        } else if self.status.is_client_error() {
            Level::WARN
        } else {
            Level::INFO
        }
    }

    fn emit(&self, trace_id: &str, elapsed_ms: f64) {
        macro_rules! completed {
            ($lvl:expr) => {
                tracing::event!(
                    $lvl,
                    method = %self.method,
                    route = %self.route,
                    game_id = self.game_id,
                    user_id = self.user_id,
                    status = self.status.as_u16(),
                    elapsed_ms,
                    trace_id,
                    "request_completed"
                )
            };
        }
        match self.level() {
            Level::ERROR => completed!(Level::ERROR),
            Level::WARN => completed!(Level::WARN),
            _ => completed!(Level::INFO),
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let trace_id = req.extensions().get::<String>().cloned();
        // Errors arrive without the routed request; keep a handle to it.
        let http_req = req.request().clone();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let completed = match &result {
                Ok(res) => Completed::from_request(res.request(), res.status()),
                Err(err) => {
                    Completed::from_request(&http_req, err.as_response_error().status_code())
                }
            };
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            completed.emit(trace_id.as_deref().unwrap_or(UNKNOWN_TRACE_ID), elapsed_ms);
            result
        })
    }
}
