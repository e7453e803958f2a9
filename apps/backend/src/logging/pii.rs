use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Centralized registry for PII redaction regex patterns.
///
/// All patterns are vetted literals, so construction cannot fail at runtime.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Compact JWS: three base64url segments, header starting with `eyJ`
    pub fn jwt() -> &'static Regex {
        static JWT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\beyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+").unwrap()
        });
        &JWT_REGEX
    }

    /// Base64-like token pattern: matches base64-encoded tokens (≥16 chars)
    pub fn base64_token() -> &'static Regex {
        static BASE64_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}").unwrap()
        });
        &BASE64_TOKEN_REGEX
    }

    /// Hex token pattern, which also covers stored password digests (≥16 chars)
    pub fn hex_token() -> &'static Regex {
        static HEX_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Fa-f0-9]{16,}\b").unwrap()
        });
        &HEX_TOKEN_REGEX
    }
}

/// Redacts credentials from a string.
///
/// JWTs become `[REDACTED_JWT]`; other opaque base64-like or hex runs of at
/// least 16 characters become `[REDACTED_TOKEN]`. JWTs go first so their
/// segments are not matched piecemeal.
pub fn redact(input: &str) -> String {
    let jwt_redacted = PiiRegexRegistry::jwt().replace_all(input, "[REDACTED_JWT]");
    let base64_redacted =
        PiiRegexRegistry::base64_token().replace_all(&jwt_redacted, "[REDACTED_TOKEN]");
    PiiRegexRegistry::hex_token()
        .replace_all(&base64_redacted, "[REDACTED_TOKEN]")
        .to_string()
}

/// Keep the first character of a username and mask the rest.
pub fn mask_username(username: &str) -> String {
    match username.chars().next() {
        Some(first) => format!("{first}***"),
        None => String::new(),
    }
}

/// A wrapper that automatically redacts sensitive strings when displayed.
pub struct Redacted<'a>(pub &'a str);

impl<'a> fmt::Display for Redacted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl<'a> fmt::Debug for Redacted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

/// Display wrapper for usernames in auth logs.
pub struct MaskedUsername<'a>(pub &'a str);

impl<'a> fmt::Display for MaskedUsername<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mask_username(self.0))
    }
}
