//! Ingestion service: the public capture path behind the API key.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::error::Error;
use crate::domain::ports::{ProjectRepository, SubmissionRepository};
use crate::domain::project::ApiKey;
use crate::domain::submission::{NewSubmission, SubmissionId};

/// Accepts submissions from embedded trackers.
///
/// The payload is opaque: nothing here inspects field names or values, and a
/// missing field defaults rather than rejects. The only gate is the API key.
pub struct IngestionService {
    projects: Arc<dyn ProjectRepository>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl IngestionService {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        submissions: Arc<dyn SubmissionRepository>,
    ) -> Self {
        Self {
            projects,
            submissions,
        }
    }

    /// Capture one submission for the project the API key resolves to.
    ///
    /// A malformed key and an unknown key are indistinguishable to the
    /// caller.
    pub async fn track(
        &self,
        api_key: &str,
        incoming: NewSubmission,
    ) -> Result<SubmissionId, Error> {
        let invalid = || Error::invalid_api_key("Invalid API key");
        let key = ApiKey::parse(api_key).map_err(|_| invalid())?;
        let project = self
            .projects
            .find_by_api_key(&key)
            .await?
            .ok_or_else(invalid)?;

        let submission = incoming.into_submission(project.id, Utc::now());
        let id = submission.id;
        info!(
            submission_id = %id,
            project_id = %project.id,
            form_id = %submission.form_id,
            "captured submission"
        );
        self.submissions.insert(submission).await?;
        Ok(id)
    }
}
