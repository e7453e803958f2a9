use std::error::Error;

use actix_web::http::StatusCode;
use actix_web::test;
use backend::auth::jwt::verify_access_token;
use backend_test_support::problem_details::{assert_problem, Detail};
use backend_test_support::unique_helpers::unique_username;
use serde_json::{json, Value};

use crate::common::assert_problem_details_structure;
use crate::support::app_builder::create_test_app;
use crate::support::test_state::{memory_state, sqlite_state, test_security};

#[actix_web::test]
async fn register_login_and_call_a_protected_route() -> Result<(), Box<dyn Error>> {
    let app = create_test_app(memory_state().await)
        .with_prod_routes()
        .build()
        .await;
    let username = unique_username("player");

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({"username": username, "password": "s3cret"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains(&username));

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({"username": username, "password": "s3cret"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["token"].as_str().expect("token").to_string();

    let claims = verify_access_token(&token, &test_security())?;
    assert_eq!(claims.username, username);
    assert_eq!(claims.exp - claims.iat, 30 * 60);

    let req = test::TestRequest::get()
        .uri("/api/hello")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn duplicate_registration_is_409_on_both_backends() {
    for state in [memory_state().await, sqlite_state().await] {
        let app = create_test_app(state).with_prod_routes().build().await;
        let body = json!({"username": "Twin", "password": "pw"});

        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(&body)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        // Case and whitespace fold onto the same account
        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({"username": " twin ", "password": "pw"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(
            resp,
            StatusCode::CONFLICT,
            "USERNAME_TAKEN",
            Detail::Any,
        )
        .await;
    }
}

#[actix_web::test]
async fn missing_fields_are_400() {
    let app = create_test_app(memory_state().await)
        .with_prod_routes()
        .build()
        .await;

    let cases = [
        (json!({"password": "pw"}), "INVALID_USERNAME"),
        (json!({"username": "   ", "password": "pw"}), "INVALID_USERNAME"),
        (json!({"username": "ok"}), "INVALID_PASSWORD"),
    ];
    for uri in ["/api/register", "/api/login"] {
        for (body, code) in &cases {
            let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri} {body}");
            let problem: Value = test::read_body_json(resp).await;
            assert_eq!(problem["code"], *code, "{uri} {body}");
        }
    }
}

#[actix_web::test]
async fn bad_credentials_are_indistinguishable() {
    let state = memory_state().await;
    state.accounts.register("known", "right").await.unwrap();
    let app = create_test_app(state).with_prod_routes().build().await;

    for (username, password) in [("known", "wrong"), ("unknown", "right")] {
        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({"username": username, "password": password}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_structure(
            resp,
            401,
            "INVALID_CREDENTIALS",
            "Invalid username or password",
        )
        .await;
    }
}
