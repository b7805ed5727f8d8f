//! PostgreSQL-backed `SubmissionRepository` implementation using Diesel.
//!
//! Queries filter on the caller's project set with `eq_any`, mirroring how
//! the query service scopes reads to one tenant.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{SubmissionRepository, SubmissionRepositoryError};
use crate::domain::project::ProjectId;
use crate::domain::submission::{Submission, SubmissionId};

use super::models::{NewSubmissionRow, SubmissionRow};
use super::pool::{DbPool, PoolError};
use super::schema::submissions;

/// Diesel-backed implementation of the `SubmissionRepository` port.
#[derive(Clone)]
pub struct DieselSubmissionRepository {
    pool: DbPool,
}

impl DieselSubmissionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SubmissionRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            SubmissionRepositoryError::unavailable(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> SubmissionRepositoryError {
    use diesel::result::Error as DieselError;

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }
    SubmissionRepositoryError::unavailable("database error")
}

fn row_to_submission(row: SubmissionRow) -> Submission {
    Submission {
        id: SubmissionId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        form_id: row.form_id,
        data: row.data,
        page_url: row.page_url,
        user_agent: row.user_agent,
        timestamp: row.submitted_at,
    }
}

#[async_trait]
impl SubmissionRepository for DieselSubmissionRepository {
    async fn insert(&self, submission: Submission) -> Result<(), SubmissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewSubmissionRow {
            id: *submission.id.as_uuid(),
            project_id: *submission.project_id.as_uuid(),
            form_id: &submission.form_id,
            data: &submission.data,
            page_url: &submission.page_url,
            user_agent: &submission.user_agent,
            submitted_at: submission.timestamp,
        };
        diesel::insert_into(submissions::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_projects(
        &self,
        projects: &[ProjectId],
    ) -> Result<Vec<Submission>, SubmissionRepositoryError> {
        if projects.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<&uuid::Uuid> = projects.iter().map(ProjectId::as_uuid).collect();
        let rows: Vec<SubmissionRow> = submissions::table
            .filter(submissions::project_id.eq_any(ids))
            .order(submissions::submitted_at.desc())
            .select(SubmissionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_submission).collect())
    }

    async fn find_for_projects(
        &self,
        id: SubmissionId,
        projects: &[ProjectId],
    ) -> Result<Option<Submission>, SubmissionRepositoryError> {
        if projects.is_empty() {
            return Ok(None);
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<&uuid::Uuid> = projects.iter().map(ProjectId::as_uuid).collect();
        let row: Option<SubmissionRow> = submissions::table
            .filter(submissions::id.eq(id.as_uuid()))
            .filter(submissions::project_id.eq_any(ids))
            .select(SubmissionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_submission))
    }

    async fn count_for_project(
        &self,
        project: ProjectId,
    ) -> Result<u64, SubmissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = submissions::table
            .filter(submissions::project_id.eq(project.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count.max(0) as u64)
    }

    async fn delete_for_project(
        &self,
        project: ProjectId,
    ) -> Result<(), SubmissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(submissions::table.filter(submissions::project_id.eq(project.as_uuid())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn pool_error_maps_to_unavailable() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, SubmissionRepositoryError::Unavailable { .. }));
    }

    #[rstest]
    fn row_converts_losslessly() {
        let row = SubmissionRow {
            id: uuid::Uuid::new_v4(),
            project_id: uuid::Uuid::new_v4(),
            form_id: "contact".to_owned(),
            data: json!({ "email": "a@b.io" }),
            page_url: "https://x.io/contact".to_owned(),
            user_agent: "Mozilla/5.0".to_owned(),
            submitted_at: Utc::now(),
        };
        let submission = row_to_submission(row.clone());
        assert_eq!(submission.id.as_uuid(), &row.id);
        assert_eq!(submission.data, row.data);
        assert_eq!(submission.timestamp, row.submitted_at);
    }
}
