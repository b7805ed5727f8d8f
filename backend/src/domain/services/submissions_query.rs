//! Tenant-scoped read side for captured submissions.

use std::sync::Arc;

use crate::domain::error::Error;
use crate::domain::ports::{ProjectRepository, SubmissionRepository};
use crate::domain::submission::{Submission, SubmissionId};
use crate::domain::user::UserId;

/// Serves the dashboard's submission views.
///
/// Every query resolves the caller's project set first and filters through
/// it, so a submission captured for another tenant's project is invisible,
/// including by direct id.
pub struct SubmissionQueryService {
    projects: Arc<dyn ProjectRepository>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl SubmissionQueryService {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        submissions: Arc<dyn SubmissionRepository>,
    ) -> Self {
        Self {
            projects,
            submissions,
        }
    }

    /// Every submission across the caller's projects, newest first.
    pub async fn list(&self, owner: UserId) -> Result<Vec<Submission>, Error> {
        let projects = self.owned_project_ids(owner).await?;
        Ok(self.submissions.list_for_projects(&projects).await?)
    }

    /// One submission by id, only if it belongs to one of the caller's
    /// projects.
    pub async fn detail(&self, owner: UserId, id: SubmissionId) -> Result<Submission, Error> {
        let projects = self.owned_project_ids(owner).await?;
        self.submissions
            .find_for_projects(id, &projects)
            .await?
            .ok_or_else(|| Error::not_found("Submission not found"))
    }

    async fn owned_project_ids(
        &self,
        owner: UserId,
    ) -> Result<Vec<crate::domain::project::ProjectId>, Error> {
        Ok(self
            .projects
            .list_by_owner(owner)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::project::{ApiKey, Project, ProjectId};
    use crate::domain::submission::NewSubmission;
    use crate::outbound::persistence::memory::{
        InMemoryProjectRepository, InMemorySubmissionRepository,
    };
    use chrono::{Duration, Utc};

    struct Fixture {
        svc: SubmissionQueryService,
        projects: Arc<InMemoryProjectRepository>,
        submissions: Arc<InMemorySubmissionRepository>,
    }

    fn fixture() -> Fixture {
        let projects = Arc::new(InMemoryProjectRepository::new());
        let submissions = Arc::new(InMemorySubmissionRepository::new());
        Fixture {
            svc: SubmissionQueryService::new(
                Arc::clone(&projects) as Arc<dyn ProjectRepository>,
                Arc::clone(&submissions) as Arc<dyn SubmissionRepository>,
            ),
            projects,
            submissions,
        }
    }

    async fn seed_project(fx: &Fixture, owner: UserId) -> Project {
        let project = Project {
            id: ProjectId::random(),
            owner_id: owner,
            name: "Site".to_owned(),
            domain: "x.io".to_owned(),
            api_key: ApiKey::generate(),
            created_at: Utc::now(),
        };
        fx.projects.insert(project.clone()).await.expect("seed project");
        project
    }

    #[tokio::test]
    async fn list_returns_newest_first_across_projects() {
        let fx = fixture();
        let owner = UserId::random();
        let first = seed_project(&fx, owner).await;
        let second = seed_project(&fx, owner).await;

        let base = Utc::now();
        for (project, offset) in [(first.id, 0), (second.id, 2), (first.id, 1)] {
            fx.submissions
                .insert(
                    NewSubmission::default()
                        .into_submission(project, base + Duration::seconds(offset)),
                )
                .await
                .expect("insert");
        }

        let listed = fx.svc.list(owner).await.expect("list");
        assert_eq!(listed.len(), 3);
        assert!(listed
            .windows(2)
            .all(|pair| pair[0].timestamp >= pair[1].timestamp));
    }

    #[tokio::test]
    async fn list_excludes_other_tenants() {
        let fx = fixture();
        let owner = UserId::random();
        let stranger = UserId::random();
        let mine = seed_project(&fx, owner).await;
        let theirs = seed_project(&fx, stranger).await;
        for project in [mine.id, theirs.id] {
            fx.submissions
                .insert(NewSubmission::default().into_submission(project, Utc::now()))
                .await
                .expect("insert");
        }

        let listed = fx.svc.list(owner).await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].project_id, mine.id);
    }

    #[tokio::test]
    async fn detail_hides_foreign_submissions_even_by_id() {
        let fx = fixture();
        let owner = UserId::random();
        let stranger = UserId::random();
        let theirs = seed_project(&fx, stranger).await;
        let submission = NewSubmission::default().into_submission(theirs.id, Utc::now());
        let id = submission.id;
        fx.submissions.insert(submission).await.expect("insert");

        let err = fx
            .svc
            .detail(owner, id)
            .await
            .expect_err("foreign submission must be hidden");
        assert_eq!(err.code, ErrorCode::NotFound);
        // The rightful owner still sees it.
        fx.svc.detail(stranger, id).await.expect("owner sees it");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let fx = fixture();
        let owner = UserId::random();
        seed_project(&fx, owner).await;
        let err = fx
            .svc
            .detail(owner, SubmissionId::random())
            .await
            .expect_err("unknown id must fail");
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
