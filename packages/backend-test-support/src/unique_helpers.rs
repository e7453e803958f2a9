//! Test helpers for generating unique test data
//!
//! ULID-suffixed values keep tests isolated from each other when they share a
//! store or database.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("user");
/// let id2 = unique_str("user");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique, lowercase username with the given prefix.
///
/// Usernames are normalized to lowercase by the backend, so the ULID suffix is
/// lowercased here to make the returned value round-trip unchanged.
pub fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, Ulid::new().to_string().to_lowercase())
}
