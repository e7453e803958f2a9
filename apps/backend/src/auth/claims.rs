//! Backend-specific JWT claims used across the application.

use serde::{Deserialize, Serialize};

/// Verified identity inserted into request extensions by `JwtExtract`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BackendClaims {
    pub user_id: i64,
    pub username: String,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
