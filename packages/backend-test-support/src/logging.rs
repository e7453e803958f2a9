//! Test logging shared by every backend test binary.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

const DEFAULT_FILTER: &str = "warn,sqlx=error";

/// Install a test-writer subscriber once per process.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then warnings only (with
/// sqlx statement logs silenced). `TEST_LOG_FORMAT=json` switches to the
/// same JSON layout the server writes, which helps when checking the fields
/// of `request_completed` events.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let builder = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time();

        // Another subscriber may already be installed; that is fine
        if std::env::var("TEST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
            builder.json().try_init().ok();
        } else {
            builder.try_init().ok();
        }
    });
}
