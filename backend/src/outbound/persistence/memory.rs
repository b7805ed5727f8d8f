//! In-process adapters for the storage ports.
//!
//! Used when no `DATABASE_URL` is configured, and by unit tests. The
//! adapters enforce the same store-level rules as Postgres, notably email
//! uniqueness, so code paths behave identically against either backend.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{
    ProjectChanges, ProjectRepository, ProjectRepositoryError, SubmissionRepository,
    SubmissionRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::password::PasswordHash;
use crate::domain::project::{ApiKey, Project, ProjectId};
use crate::domain::submission::{Submission, SubmissionId};
use crate::domain::user::{EmailAddress, User, UserId};

fn poisoned<E>(make: impl FnOnce(String) -> E) -> E {
    make("store lock poisoned".to_owned())
}

/// User storage backed by a locked vector.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<(), UserRepositoryError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| poisoned(|m| UserRepositoryError::Unavailable { message: m }))?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserRepositoryError::DuplicateEmail);
        }
        users.push(user);
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let users = self
            .users
            .read()
            .map_err(|_| poisoned(|m| UserRepositoryError::Unavailable { message: m }))?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let users = self
            .users
            .read()
            .map_err(|_| poisoned(|m| UserRepositoryError::Unavailable { message: m }))?;
        Ok(users.iter().find(|u| &u.email == email).cloned())
    }

    async fn update_name(&self, id: UserId, name: String) -> Result<User, UserRepositoryError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| poisoned(|m| UserRepositoryError::Unavailable { message: m }))?;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserRepositoryError::NotFound)?;
        user.name = name;
        Ok(user.clone())
    }

    async fn update_password(
        &self,
        id: UserId,
        password: PasswordHash,
    ) -> Result<(), UserRepositoryError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| poisoned(|m| UserRepositoryError::Unavailable { message: m }))?;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserRepositoryError::NotFound)?;
        user.password = password;
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| poisoned(|m| UserRepositoryError::Unavailable { message: m }))?;
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(UserRepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Project storage backed by a locked vector, insertion-ordered.
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    projects: RwLock<Vec<Project>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn insert(&self, project: Project) -> Result<(), ProjectRepositoryError> {
        let mut projects = self
            .projects
            .write()
            .map_err(|_| poisoned(|m| ProjectRepositoryError::Unavailable { message: m }))?;
        projects.push(project);
        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        let projects = self
            .projects
            .read()
            .map_err(|_| poisoned(|m| ProjectRepositoryError::Unavailable { message: m }))?;
        Ok(projects
            .iter()
            .filter(|p| p.owner_id == owner)
            .cloned()
            .collect())
    }

    async fn find_owned(
        &self,
        owner: UserId,
        id: ProjectId,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let projects = self
            .projects
            .read()
            .map_err(|_| poisoned(|m| ProjectRepositoryError::Unavailable { message: m }))?;
        Ok(projects
            .iter()
            .find(|p| p.id == id && p.owner_id == owner)
            .cloned())
    }

    async fn find_by_api_key(
        &self,
        key: &ApiKey,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let projects = self
            .projects
            .read()
            .map_err(|_| poisoned(|m| ProjectRepositoryError::Unavailable { message: m }))?;
        Ok(projects.iter().find(|p| &p.api_key == key).cloned())
    }

    async fn update_owned(
        &self,
        owner: UserId,
        id: ProjectId,
        changes: ProjectChanges,
    ) -> Result<Project, ProjectRepositoryError> {
        let mut projects = self
            .projects
            .write()
            .map_err(|_| poisoned(|m| ProjectRepositoryError::Unavailable { message: m }))?;
        let project = projects
            .iter_mut()
            .find(|p| p.id == id && p.owner_id == owner)
            .ok_or(ProjectRepositoryError::NotFound)?;
        if let Some(name) = changes.name {
            project.name = name;
        }
        if let Some(domain) = changes.domain {
            project.domain = domain;
        }
        Ok(project.clone())
    }

    async fn set_api_key(
        &self,
        owner: UserId,
        id: ProjectId,
        key: ApiKey,
    ) -> Result<Project, ProjectRepositoryError> {
        let mut projects = self
            .projects
            .write()
            .map_err(|_| poisoned(|m| ProjectRepositoryError::Unavailable { message: m }))?;
        let project = projects
            .iter_mut()
            .find(|p| p.id == id && p.owner_id == owner)
            .ok_or(ProjectRepositoryError::NotFound)?;
        project.api_key = key;
        Ok(project.clone())
    }

    async fn delete_owned(
        &self,
        owner: UserId,
        id: ProjectId,
    ) -> Result<(), ProjectRepositoryError> {
        let mut projects = self
            .projects
            .write()
            .map_err(|_| poisoned(|m| ProjectRepositoryError::Unavailable { message: m }))?;
        let before = projects.len();
        projects.retain(|p| !(p.id == id && p.owner_id == owner));
        if projects.len() == before {
            return Err(ProjectRepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Submission storage backed by a locked vector.
#[derive(Debug, Default)]
pub struct InMemorySubmissionRepository {
    submissions: RwLock<Vec<Submission>>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn insert(&self, submission: Submission) -> Result<(), SubmissionRepositoryError> {
        let mut submissions = self
            .submissions
            .write()
            .map_err(|_| poisoned(|m| SubmissionRepositoryError::Unavailable { message: m }))?;
        submissions.push(submission);
        Ok(())
    }

    async fn list_for_projects(
        &self,
        projects: &[ProjectId],
    ) -> Result<Vec<Submission>, SubmissionRepositoryError> {
        let submissions = self
            .submissions
            .read()
            .map_err(|_| poisoned(|m| SubmissionRepositoryError::Unavailable { message: m }))?;
        let mut matched: Vec<Submission> = submissions
            .iter()
            .filter(|s| projects.contains(&s.project_id))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(matched)
    }

    async fn find_for_projects(
        &self,
        id: SubmissionId,
        projects: &[ProjectId],
    ) -> Result<Option<Submission>, SubmissionRepositoryError> {
        let submissions = self
            .submissions
            .read()
            .map_err(|_| poisoned(|m| SubmissionRepositoryError::Unavailable { message: m }))?;
        Ok(submissions
            .iter()
            .find(|s| s.id == id && projects.contains(&s.project_id))
            .cloned())
    }

    async fn count_for_project(
        &self,
        project: ProjectId,
    ) -> Result<u64, SubmissionRepositoryError> {
        let submissions = self
            .submissions
            .read()
            .map_err(|_| poisoned(|m| SubmissionRepositoryError::Unavailable { message: m }))?;
        Ok(submissions
            .iter()
            .filter(|s| s.project_id == project)
            .count() as u64)
    }

    async fn delete_for_project(
        &self,
        project: ProjectId,
    ) -> Result<(), SubmissionRepositoryError> {
        let mut submissions = self
            .submissions
            .write()
            .map_err(|_| poisoned(|m| SubmissionRepositoryError::Unavailable { message: m }))?;
        submissions.retain(|s| s.project_id != project);
        Ok(())
    }
}
