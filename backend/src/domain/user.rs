//! User account data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::password::PasswordHash;

/// Validation errors returned by user value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidId,
    EmptyName,
    EmptyEmail,
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain a local part and a domain"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-validated UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse an identifier from its string form.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered email address.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace, otherwise stored as supplied.
/// - Comparison is exact (case-sensitive), matching the uniqueness rule the
///   store enforces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        // Deliberately loose: one '@' with non-empty sides. Deliverability is
        // the tenant's problem, not the platform's.
        let mut parts = trimmed.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        if local.is_empty() || domain.is_empty() {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Full user record as held by the credential store.
///
/// The password is only ever present as a salted digest; see
/// [`PasswordHash`]. Public responses use [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub password: PasswordHash,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Public projection exposed over the API.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// Public user projection: everything except the credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}

/// Validate a display name for registration and profile updates.
pub fn validate_name(raw: &str) -> Result<String, UserValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UserValidationError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyEmail)]
    #[case("   ", UserValidationError::EmptyEmail)]
    #[case("no-at-sign", UserValidationError::InvalidEmail)]
    #[case("@missing-local", UserValidationError::InvalidEmail)]
    #[case("missing-domain@", UserValidationError::InvalidEmail)]
    fn invalid_emails(#[case] raw: &str, #[case] expected: UserValidationError) {
        let err = EmailAddress::new(raw).expect_err("invalid email must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("demo@datapulse.io")]
    #[case("  padded@x.io  ")]
    fn valid_emails_are_trimmed(#[case] raw: &str) {
        let email = EmailAddress::new(raw).expect("valid email");
        assert_eq!(email.as_ref(), raw.trim());
    }

    #[test]
    fn emails_compare_case_sensitively() {
        let lower = EmailAddress::new("demo@x.io").expect("valid");
        let upper = EmailAddress::new("Demo@x.io").expect("valid");
        assert_ne!(lower, upper);
    }

    #[test]
    fn user_id_parses_and_round_trips() {
        let id = UserId::random();
        let parsed = UserId::parse(&id.to_string()).expect("round trip");
        assert_eq!(id, parsed);
    }

    #[test]
    fn name_validation_trims() {
        assert_eq!(validate_name("  Ada  ").expect("valid"), "Ada");
        assert_eq!(
            validate_name("   ").expect_err("blank name must fail"),
            UserValidationError::EmptyName
        );
    }
}
