//! Session code value object.
//!
//! Codes are four lowercase ASCII letters. Clients type them by hand, so
//! parsing trims whitespace and folds case before validating.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Number of letters in a session code.
pub const CODE_LENGTH: usize = 4;

/// Short human-typeable identifier of an active session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionCode(String);

impl SessionCode {
    /// Parses and normalizes a user-supplied code.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::empty_field("code"));
        }
        if normalized.len() != CODE_LENGTH || !normalized.bytes().all(|b| b.is_ascii_lowercase())
        {
            return Err(ValidationError::invalid_format(
                "code",
                format!("expected {} letters, got '{}'", CODE_LENGTH, raw.trim()),
            ));
        }
        Ok(Self(normalized))
    }

    /// Draws a uniformly random code from the 26^4 code space.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..CODE_LENGTH)
            .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
            .collect();
        Self(code)
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SessionCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SessionCode> for String {
    fn from(code: SessionCode) -> Self {
        code.0
    }
}
