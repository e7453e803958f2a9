//! JWT helpers for tests

use std::time::{Duration, SystemTime};

use backend::auth::jwt::mint_access_token;
use backend::state::security_config::SecurityConfig;

/// Bearer token (without the `Bearer ` prefix) for the given user.
pub fn mint_test_token(user_id: i64, username: &str, sec: &SecurityConfig) -> String {
    mint_access_token(user_id, username, SystemTime::now(), sec)
        .expect("should mint token successfully")
}

pub fn bearer_header(user_id: i64, username: &str, sec: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(user_id, username, sec))
}

/// Token issued two hours ago, well past the default TTL.
pub fn mint_expired_token(user_id: i64, username: &str, sec: &SecurityConfig) -> String {
    let past_time = SystemTime::now()
        .checked_sub(Duration::from_secs(7200))
        .unwrap();
    mint_access_token(user_id, username, past_time, sec)
        .expect("should mint expired token successfully")
}
