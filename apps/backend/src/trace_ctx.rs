//! Task-local trace id for the request being served.
//!
//! `RequestTrace` opens the scope; `AppError::error_response` and the body
//! extractor read it so problem details and the `x-trace-id` header agree.
//! Work moved onto another task with `tokio::spawn` does not inherit it.

use std::future::Future;

use tokio::task_local;

/// Reported when no request scope is active.
pub const UNKNOWN_TRACE_ID: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current request, if inside one.
pub fn current() -> Option<String> {
    TRACE_ID.try_with(String::clone).ok()
}

/// Trace id of the current request, or [`UNKNOWN_TRACE_ID`].
pub fn trace_id() -> String {
    current().unwrap_or_else(|| UNKNOWN_TRACE_ID.to_string())
}

/// Drive `future` with `trace_id` visible to everything it awaits.
pub async fn with_trace_id<F: Future>(trace_id: String, future: F) -> F::Output {
    TRACE_ID.scope(trace_id, future).await
}
