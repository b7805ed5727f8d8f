//! Project (tenant) data model and API key format.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

const API_KEY_PREFIX: &str = "dp_";
const API_KEY_HEX_LEN: usize = 32;

/// Validation errors returned by project value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    InvalidId,
    EmptyName,
    MalformedApiKey,
}

impl fmt::Display for ProjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "project id must be a valid UUID"),
            Self::EmptyName => write!(f, "project name must not be empty"),
            Self::MalformedApiKey => {
                write!(f, "API key must be `dp_` followed by 32 lowercase hex digits")
            }
        }
    }
}

impl std::error::Error for ProjectValidationError {}

/// Stable project identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Generate a new random [`ProjectId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-validated UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse an identifier from its string form.
    pub fn parse(raw: &str) -> Result<Self, ProjectValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| ProjectValidationError::InvalidId)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ingestion credential: `dp_` followed by 32 lowercase hex digits.
///
/// ## Invariants
/// - Format is validated on construction; a stored key never fails to parse.
/// - Keys are compared exactly. Rotation replaces the whole value, so an old
///   key stops matching the moment the new one is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiKey(String);

impl ApiKey {
    /// Generate a fresh random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; API_KEY_HEX_LEN / 2];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(format!("{API_KEY_PREFIX}{}", hex::encode(bytes)))
    }

    /// Validate and wrap an existing key string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ProjectValidationError> {
        let raw = raw.into();
        let Some(suffix) = raw.strip_prefix(API_KEY_PREFIX) else {
            return Err(ProjectValidationError::MalformedApiKey);
        };
        if suffix.len() != API_KEY_HEX_LEN
            || !suffix.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase())
        {
            return Err(ProjectValidationError::MalformedApiKey);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ApiKey> for String {
    fn from(value: ApiKey) -> Self {
        value.0
    }
}

impl TryFrom<String> for ApiKey {
    type Error = ProjectValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// A tenant boundary: one website or application emitting submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub owner_id: UserId,
    pub name: String,
    pub domain: String,
    pub api_key: ApiKey,
    pub created_at: DateTime<Utc>,
}

/// Validate a project display name.
pub fn validate_project_name(raw: &str) -> Result<String, ProjectValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProjectValidationError::EmptyName);
    }
    Ok(trimmed.to_owned())
}
