//! Assertions for the RFC 7807 error contract served by the backend.
//!
//! Kept free of backend types so the contract is checked from the outside:
//! status, `application/problem+json`, `x-trace-id` parity with the body,
//! `WWW-Authenticate: Bearer` on 401 only, and `type` ending in the code.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderMap, CONTENT_TYPE, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Error body as a client sees it.
#[derive(Debug, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// How strictly to compare `detail`.
#[derive(Debug, Clone, Copy)]
pub enum Detail<'a> {
    Exact(&'a str),
    Contains(&'a str),
    Any,
}

/// Check headers and body against the contract and return the parsed body.
pub fn assert_problem_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
    detail: Detail<'_>,
) -> Problem {
    assert_eq!(status, expected_status, "status for {expected_code}");

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "content type was {content_type:?}"
    );

    let www_auth = headers.get(WWW_AUTHENTICATE).and_then(|v| v.to_str().ok());
    if expected_status == StatusCode::UNAUTHORIZED {
        assert_eq!(www_auth, Some("Bearer"));
    } else {
        assert_eq!(www_auth, None, "WWW-Authenticate only belongs on 401");
    }

    let problem: Problem = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "not a problem body ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });

    let header_trace = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header");
    assert!(!header_trace.is_empty());
    assert_eq!(problem.trace_id, header_trace, "body and header trace ids");

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert!(
        problem.type_uri.ends_with(&format!("/errors/{expected_code}")),
        "type {} does not name {expected_code}",
        problem.type_uri
    );
    assert!(!problem.title.is_empty());

    match detail {
        Detail::Exact(want) => assert_eq!(problem.detail, want),
        Detail::Contains(part) => assert!(
            problem.detail.contains(part),
            "detail {:?} lacks {part:?}",
            problem.detail
        ),
        Detail::Any => {}
    }
    problem
}

/// [`assert_problem_parts`] over a test service response.
pub async fn assert_problem(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
    detail: Detail<'_>,
) -> Problem {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;
    assert_problem_parts(status, &headers, &body, expected_status, expected_code, detail)
}
