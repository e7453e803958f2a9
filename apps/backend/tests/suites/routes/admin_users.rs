use std::error::Error;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use crate::common::assert_problem_details_structure;
use crate::support::app_builder::create_test_app;
use crate::support::factory::{create_test_admin, create_test_user};
use crate::support::test_state::memory_state;

#[actix_web::test]
async fn hello_needs_any_user() -> Result<(), Box<dyn Error>> {
    let state = memory_state().await;
    let u = create_test_user(&state, "u").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/hello")
        .insert_header(("Authorization", u.bearer.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Hello, world!");
    Ok(())
}

#[actix_web::test]
async fn dashboard_and_users_are_admin_only() -> Result<(), Box<dyn Error>> {
    let state = memory_state().await;
    let admin = create_test_admin(&state).await;
    let u = create_test_user(&state, "u").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/dashboard")
        .insert_header(("Authorization", u.bearer.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 403, "ADMIN_REQUIRED", "Administrator role required")
        .await;

    let req = test::TestRequest::get()
        .uri("/api/dashboard")
        .insert_header(("Authorization", admin.bearer.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Welcome to the admin dashboard!");

    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header(("Authorization", admin.bearer.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let users = body["users"].as_array().expect("users array");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["username"], admin.record.username.as_str());
    assert_eq!(users[0]["role"], "admin");
    assert_eq!(users[1]["role"], "user");
    assert!(users[1].get("password_hash").is_none());
    Ok(())
}

#[actix_web::test]
async fn admin_deletes_users() -> Result<(), Box<dyn Error>> {
    let state = memory_state().await;
    let admin = create_test_admin(&state).await;
    let victim = create_test_user(&state, "victim").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let uri = format!("/api/user/delete/{}", victim.record.username);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", victim.bearer.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", admin.bearer.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", admin.bearer.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "USER_NOT_FOUND");

    // The deleted user's still-valid token no longer resolves
    let req = test::TestRequest::get()
        .uri("/api/hello")
        .insert_header(("Authorization", victim.bearer.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(
        resp,
        403,
        "FORBIDDEN_USER_NOT_FOUND",
        "User not found in database",
    )
    .await;
    Ok(())
}
