//! Form submission data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::project::ProjectId;

/// Validation errors returned by submission value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionValidationError {
    InvalidId,
}

impl fmt::Display for SubmissionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "submission id must be a valid UUID"),
        }
    }
}

impl std::error::Error for SubmissionValidationError {}

/// Stable submission identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Generate a new random [`SubmissionId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-validated UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse an identifier from its string form.
    pub fn parse(raw: &str) -> Result<Self, SubmissionValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| SubmissionValidationError::InvalidId)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One captured form submission.
///
/// The `data` payload is opaque: ingestion stores whatever JSON the caller
/// sent without inspecting field names or values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: SubmissionId,
    pub project_id: ProjectId,
    pub form_id: String,
    pub data: Value,
    pub page_url: String,
    pub user_agent: String,
    pub timestamp: DateTime<Utc>,
}

/// Caller-supplied submission fields, before ingestion defaults are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub form_id: Option<String>,
    pub data: Option<Value>,
    pub page_url: Option<String>,
    pub user_agent: Option<String>,
}

impl NewSubmission {
    /// Apply ingestion defaults and stamp the submission for the resolved
    /// project.
    ///
    /// Missing fields never reject a capture: `formId` falls back to
    /// `"unknown"` (an empty string counts as missing), `data` to an empty
    /// object, and the page context fields to empty strings.
    pub fn into_submission(self, project_id: ProjectId, timestamp: DateTime<Utc>) -> Submission {
        Submission {
            id: SubmissionId::random(),
            project_id,
            form_id: self
                .form_id
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| "unknown".to_owned()),
            data: self.data.unwrap_or_else(|| Value::Object(Default::default())),
            page_url: self.page_url.unwrap_or_default(),
            user_agent: self.user_agent.unwrap_or_default(),
            timestamp,
        }
    }
}
