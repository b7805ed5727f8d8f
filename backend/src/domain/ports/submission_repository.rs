//! Outbound port for submission storage.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::project::ProjectId;
use crate::domain::submission::{Submission, SubmissionId};

/// Failures surfaced by [`SubmissionRepository`] implementations.
#[derive(Debug, Error)]
pub enum SubmissionRepositoryError {
    /// The backing store is unreachable or misbehaving.
    #[error("submission store unavailable: {message}")]
    Unavailable { message: String },
}

impl SubmissionRepositoryError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

impl From<SubmissionRepositoryError> for crate::domain::Error {
    fn from(err: SubmissionRepositoryError) -> Self {
        match err {
            SubmissionRepositoryError::Unavailable { message } => {
                tracing::error!(%message, "submission store unavailable");
                Self::service_unavailable("Service temporarily unavailable")
            }
        }
    }
}

/// Storage abstraction for captured submissions.
///
/// Queries take the caller's project set rather than a user, so the same
/// port serves both ingestion (single project) and the tenant-scoped query
/// layer (all of a user's projects).
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Persist a captured submission.
    async fn insert(&self, submission: Submission) -> Result<(), SubmissionRepositoryError>;

    /// All submissions belonging to the given projects, newest first.
    async fn list_for_projects(
        &self,
        projects: &[ProjectId],
    ) -> Result<Vec<Submission>, SubmissionRepositoryError>;

    /// One submission, only if it belongs to one of the given projects.
    async fn find_for_projects(
        &self,
        id: SubmissionId,
        projects: &[ProjectId],
    ) -> Result<Option<Submission>, SubmissionRepositoryError>;

    /// Number of submissions captured for a project.
    async fn count_for_project(
        &self,
        project: ProjectId,
    ) -> Result<u64, SubmissionRepositoryError>;

    /// Remove every submission belonging to a project.
    async fn delete_for_project(
        &self,
        project: ProjectId,
    ) -> Result<(), SubmissionRepositoryError>;
}
