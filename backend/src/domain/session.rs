//! Session token type for the bearer authentication scheme.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

const TOKEN_HEX_LEN: usize = 64;

/// Validation errors for session token input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionValidationError {
    MalformedToken,
}

impl fmt::Display for SessionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedToken => {
                write!(f, "session token must be 64 lowercase hex digits")
            }
        }
    }
}

impl std::error::Error for SessionValidationError {}

/// Opaque bearer token identifying a login session.
///
/// Tokens are 32 random bytes, hex-encoded. They carry no embedded claims;
/// the session store is the sole authority on what a token means.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random token.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_HEX_LEN / 2];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Validate and wrap a presented token string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, SessionValidationError> {
        let raw = raw.into();
        if raw.len() != TOKEN_HEX_LEN
            || !raw.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase())
        {
            return Err(SessionValidationError::MalformedToken);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<SessionToken> for String {
    fn from(value: SessionToken) -> Self {
        value.0
    }
}

impl TryFrom<String> for SessionToken {
    type Error = SessionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
