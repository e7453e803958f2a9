#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use backend_test_support::problem_details::{assert_problem, Detail};

// Logging is auto-installed for every test binary that declares `mod common`
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Full problem-details contract check with an exact detail, plus the
/// service's own `type` URI.
pub async fn assert_problem_details_structure(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
    expected_detail: &str,
) {
    let status = StatusCode::from_u16(expected_status).expect("valid status");
    let problem = assert_problem(resp, status, expected_code, Detail::Exact(expected_detail)).await;
    assert_eq!(
        problem.type_uri,
        format!("https://cowsbulls.dev/errors/{expected_code}")
    );
}
