//! Four-digit strings used for secret codes and guesses.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::errors::domain::{DomainError, ValidationKind};

pub const CODE_LEN: usize = 4;

/// Exactly four ASCII digits. Repeated digits are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourDigits([u8; CODE_LEN]);

impl FourDigits {
    /// Parse a caller-supplied value; `kind` selects which input was malformed.
    pub fn parse(raw: &str, kind: ValidationKind) -> Result<Self, DomainError> {
        let bytes = raw.as_bytes();
        if bytes.len() != CODE_LEN || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(DomainError::invalid(
                kind,
                format!("Expected exactly {CODE_LEN} digits, got '{raw}'"),
            ));
        }
        let mut digits = [0u8; CODE_LEN];
        digits.copy_from_slice(bytes);
        Ok(Self(digits))
    }

    pub fn parse_code(raw: &str) -> Result<Self, DomainError> {
        Self::parse(raw, ValidationKind::Code)
    }

    pub fn parse_guess(raw: &str) -> Result<Self, DomainError> {
        Self::parse(raw, ValidationKind::Guess)
    }

    pub fn digits(&self) -> &[u8; CODE_LEN] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for FourDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FourDigits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
