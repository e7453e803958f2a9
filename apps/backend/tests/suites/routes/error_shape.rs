use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use backend::error::AppError;
use backend::errors::ErrorCode;
use backend_test_support::problem_details::{assert_problem, Detail};

use crate::support::app_builder::create_test_app;
use crate::support::test_state::memory_state;

async fn conflict() -> Result<HttpResponse, AppError> {
    Err(AppError::conflict(
        ErrorCode::OptimisticLock,
        "Game was modified concurrently",
    ))
}

async fn unavailable() -> Result<HttpResponse, AppError> {
    Err(AppError::db_unavailable("Database unavailable"))
}

#[actix_web::test]
async fn handler_errors_carry_matching_trace_ids() {
    let app = create_test_app(memory_state().await)
        .with_routes(|cfg| {
            cfg.route("/conflict", web::get().to(conflict))
                .route("/unavailable", web::get().to(unavailable));
        })
        .build()
        .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/conflict").to_request()).await;
    assert_problem(
        resp,
        StatusCode::CONFLICT,
        "OPTIMISTIC_LOCK",
        Detail::Contains("modified concurrently"),
    )
    .await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/unavailable").to_request()).await;
    assert_problem(
        resp,
        StatusCode::SERVICE_UNAVAILABLE,
        "DB_UNAVAILABLE",
        Detail::Any,
    )
    .await;
}

#[actix_web::test]
async fn each_request_gets_a_distinct_trace_id() {
    let app = create_test_app(memory_state().await)
        .with_prod_routes()
        .build()
        .await;

    let mut seen = Vec::new();
    for _ in 0..2 {
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let id = resp
            .headers()
            .get("x-trace-id")
            .and_then(|v| v.to_str().ok())
            .expect("trace header on success")
            .to_string();
        seen.push(id);
    }
    assert_ne!(seen[0], seen[1]);
}
