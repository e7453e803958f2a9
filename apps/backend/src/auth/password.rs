//! Password digests.
//!
//! New digests are argon2id PHC strings (`$argon2id$v=19$...`). Rows written
//! before that carry the older `<salt, base64url>$<blake3 hex>` form, which
//! still verifies so existing accounts keep working.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::errors::domain::{DomainError, InfraErrorKind};

const SALT_LEN: usize = 16;
const PHC_PREFIX: &str = "$argon2";
const LEGACY_KDF_CONTEXT: &str = "cowsbulls 2025-03-01 password digest v1";

pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt_bytes: [u8; SALT_LEN] = rand::random();
    let salt = SaltString::encode_b64(&salt_bytes).map_err(hashing_failed)?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(hashing_failed)?;
    Ok(hash.to_string())
}

/// Returns false for a wrong password and for malformed stored values.
pub fn verify_password(password: &str, stored: &str) -> bool {
    if stored.starts_with(PHC_PREFIX) {
        let Ok(parsed) = PasswordHash::new(stored) else {
            return false;
        };
        return Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();
    }
    verify_legacy(password, stored)
}

/// True when `stored` predates argon2id and should be replaced.
pub fn needs_rehash(stored: &str) -> bool {
    !stored.starts_with(PHC_PREFIX)
}

fn hashing_failed(err: argon2::password_hash::Error) -> DomainError {
    DomainError::infra(
        InfraErrorKind::Other("password_hash".into()),
        format!("password hashing failed: {err}"),
    )
}

fn legacy_digest(salt: &[u8], password: &str) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new_derive_key(LEGACY_KDF_CONTEXT);
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize()
}

fn verify_legacy(password: &str, stored: &str) -> bool {
    let Some((salt_b64, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = URL_SAFE_NO_PAD.decode(salt_b64) else {
        return false;
    };
    let Ok(expected) = blake3::Hash::from_hex(digest_hex) else {
        return false;
    };
    // blake3::Hash equality is constant-time
    legacy_digest(&salt, password) == expected
}
