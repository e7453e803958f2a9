use std::error::Error;

use actix_web::test;
use serde_json::Value;

use crate::support::app_builder::create_test_app;
use crate::support::test_state::{memory_state, sqlite_state};

#[actix_web::test]
async fn health_on_memory_stores() -> Result<(), Box<dyn Error>> {
    let app = create_test_app(memory_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "memory");
    assert_eq!(body["migrations"], "none");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body["time"].as_str().is_some());
    Ok(())
}

#[actix_web::test]
async fn health_on_sqlite_reports_latest_migration() -> Result<(), Box<dyn Error>> {
    let app = create_test_app(sqlite_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20250301_000001_init");
    assert!(body.get("db_error").is_none());
    Ok(())
}

#[actix_web::test]
async fn root_serves_plain_text_banner() {
    let app = create_test_app(memory_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("Cows and Bulls"));
}
