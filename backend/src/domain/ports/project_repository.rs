//! Outbound port for project (tenant) storage.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::project::{ApiKey, Project, ProjectId};
use crate::domain::user::UserId;

/// Failures surfaced by [`ProjectRepository`] implementations.
#[derive(Debug, Error)]
pub enum ProjectRepositoryError {
    /// No project matches the identifier within the caller's scope.
    #[error("project not found")]
    NotFound,
    /// The backing store is unreachable or misbehaving.
    #[error("project store unavailable: {message}")]
    Unavailable { message: String },
}

impl ProjectRepositoryError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

impl From<ProjectRepositoryError> for crate::domain::Error {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::NotFound => Self::not_found("Project not found"),
            ProjectRepositoryError::Unavailable { message } => {
                tracing::error!(%message, "project store unavailable");
                Self::service_unavailable("Service temporarily unavailable")
            }
        }
    }
}

/// Fields a tenant may change on an existing project.
#[derive(Debug, Clone)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub domain: Option<String>,
}

/// Storage abstraction for projects.
///
/// Ownership scoping lives in the port: every lookup or mutation that takes
/// an owner only sees that owner's projects, so tenant isolation cannot be
/// forgotten at a call site.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persist a new project.
    async fn insert(&self, project: Project) -> Result<(), ProjectRepositoryError>;

    /// All projects owned by the user, oldest first.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Fetch one project, scoped to the owner.
    async fn find_owned(
        &self,
        owner: UserId,
        id: ProjectId,
    ) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Resolve an ingestion credential to its project, if any.
    async fn find_by_api_key(
        &self,
        key: &ApiKey,
    ) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Apply changes to an owned project and return the updated record.
    async fn update_owned(
        &self,
        owner: UserId,
        id: ProjectId,
        changes: ProjectChanges,
    ) -> Result<Project, ProjectRepositoryError>;

    /// Atomically replace the project's API key and return the updated record.
    async fn set_api_key(
        &self,
        owner: UserId,
        id: ProjectId,
        key: ApiKey,
    ) -> Result<Project, ProjectRepositoryError>;

    /// Delete an owned project.
    async fn delete_owned(
        &self,
        owner: UserId,
        id: ProjectId,
    ) -> Result<(), ProjectRepositoryError>;
}
