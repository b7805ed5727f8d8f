//! Tenant service: project lifecycle, counts, and API key rotation.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::error::Error;
use crate::domain::ports::{ProjectChanges, ProjectRepository, SubmissionRepository};
use crate::domain::project::{validate_project_name, ApiKey, Project, ProjectId};
use crate::domain::user::UserId;

/// A project together with its submission count, as the dashboard shows it.
#[derive(Debug, Clone)]
pub struct ProjectOverview {
    pub project: Project,
    pub submission_count: u64,
}

/// Requested edits to a project. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProjectEdit {
    pub name: Option<String>,
    pub domain: Option<String>,
}

/// Orchestrates project ownership and the ingestion credentials attached to
/// each project.
///
/// Every operation is scoped to the calling owner; a project belonging to
/// another tenant behaves exactly like one that does not exist.
pub struct TenantService {
    projects: Arc<dyn ProjectRepository>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl TenantService {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        submissions: Arc<dyn SubmissionRepository>,
    ) -> Self {
        Self {
            projects,
            submissions,
        }
    }

    /// Create a project with a freshly generated API key.
    pub async fn create_project(
        &self,
        owner: UserId,
        name: &str,
        domain: &str,
    ) -> Result<Project, Error> {
        let name =
            validate_project_name(name).map_err(|e| Error::invalid_request(e.to_string()))?;
        let project = Project {
            id: ProjectId::random(),
            owner_id: owner,
            name,
            domain: domain.trim().to_owned(),
            api_key: ApiKey::generate(),
            created_at: Utc::now(),
        };
        self.projects.insert(project.clone()).await?;
        info!(project_id = %project.id, owner_id = %owner, "created project");
        Ok(project)
    }

    /// All of the owner's projects with their submission counts, oldest
    /// first.
    pub async fn list_projects(&self, owner: UserId) -> Result<Vec<ProjectOverview>, Error> {
        let projects = self.projects.list_by_owner(owner).await?;
        // One count query per project. Dashboards list a handful of projects,
        // so this stays simpler than a grouped join across two ports.
        let mut overviews = Vec::with_capacity(projects.len());
        for project in projects {
            let submission_count = self.submissions.count_for_project(project.id).await?;
            overviews.push(ProjectOverview {
                project,
                submission_count,
            });
        }
        Ok(overviews)
    }

    /// Apply edits to an owned project.
    pub async fn update_project(
        &self,
        owner: UserId,
        id: ProjectId,
        edit: ProjectEdit,
    ) -> Result<Project, Error> {
        let name = edit
            .name
            .map(|n| validate_project_name(&n))
            .transpose()
            .map_err(|e| Error::invalid_request(e.to_string()))?;
        let changes = ProjectChanges {
            name,
            domain: edit.domain.map(|d| d.trim().to_owned()),
        };
        let project = self.projects.update_owned(owner, id, changes).await?;
        Ok(project)
    }

    /// Replace the project's API key with a fresh one.
    ///
    /// The swap is atomic at the store: the old key stops resolving the
    /// moment the new one is visible, with no window where both work.
    pub async fn regenerate_api_key(
        &self,
        owner: UserId,
        id: ProjectId,
    ) -> Result<Project, Error> {
        let project = self
            .projects
            .set_api_key(owner, id, ApiKey::generate())
            .await?;
        info!(project_id = %project.id, owner_id = %owner, "rotated project API key");
        Ok(project)
    }

    /// Delete an owned project and every submission captured for it.
    pub async fn delete_project(&self, owner: UserId, id: ProjectId) -> Result<(), Error> {
        // Confirm ownership before touching submissions so a foreign or
        // unknown id fails without side effects.
        self.projects
            .find_owned(owner, id)
            .await?
            .ok_or_else(|| Error::not_found("Project not found"))?;
        self.submissions.delete_for_project(id).await?;
        self.projects.delete_owned(owner, id).await?;
        info!(project_id = %id, owner_id = %owner, "deleted project");
        Ok(())
    }

    /// Delete everything the owner holds: every project and its submissions.
    ///
    /// Runs as part of account deletion so a removed user's API keys stop
    /// capturing immediately.
    pub async fn purge_owner(&self, owner: UserId) -> Result<(), Error> {
        for project in self.projects.list_by_owner(owner).await? {
            self.submissions.delete_for_project(project.id).await?;
            self.projects.delete_owned(owner, project.id).await?;
        }
        info!(owner_id = %owner, "purged owner's projects");
        Ok(())
    }
}
