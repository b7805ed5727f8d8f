//! PostgreSQL-backed `ProjectRepository` implementation using Diesel.
//!
//! Ownership scoping happens in the SQL itself: every owner-scoped query
//! filters on `owner_id`, so a foreign project id simply matches no rows.
//! Key rotation is a single `UPDATE ... RETURNING`, which makes the swap
//! atomic.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ProjectChanges, ProjectRepository, ProjectRepositoryError};
use crate::domain::project::{ApiKey, Project, ProjectId};
use crate::domain::user::UserId;

use super::models::{NewProjectRow, ProjectRow, ProjectRowChanges};
use super::pool::{DbPool, PoolError};
use super::schema::projects;

/// Diesel-backed implementation of the `ProjectRepository` port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProjectRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ProjectRepositoryError::unavailable(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ProjectRepositoryError {
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

    match error {
        DieselError::NotFound => ProjectRepositoryError::NotFound,
        _ => ProjectRepositoryError::unavailable("database error"),
    }
}

fn row_to_project(row: ProjectRow) -> Result<Project, ProjectRepositoryError> {
    let api_key = ApiKey::parse(row.api_key).map_err(|err| {
        ProjectRepositoryError::unavailable(format!("corrupt API key in project row: {err}"))
    })?;
    Ok(Project {
        id: ProjectId::from_uuid(row.id),
        owner_id: UserId::from_uuid(row.owner_id),
        name: row.name,
        domain: row.domain,
        api_key,
        created_at: row.created_at,
    })
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn insert(&self, project: Project) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewProjectRow {
            id: *project.id.as_uuid(),
            owner_id: *project.owner_id.as_uuid(),
            name: &project.name,
            domain: &project.domain,
            api_key: project.api_key.as_ref(),
            created_at: project.created_at,
        };
        diesel::insert_into(projects::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProjectRow> = projects::table
            .filter(projects::owner_id.eq(owner.as_uuid()))
            .order(projects::created_at.asc())
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_project).collect()
    }

    async fn find_owned(
        &self,
        owner: UserId,
        id: ProjectId,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProjectRow> = projects::table
            .filter(projects::id.eq(id.as_uuid()))
            .filter(projects::owner_id.eq(owner.as_uuid()))
            .select(ProjectRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_project).transpose()
    }

    async fn find_by_api_key(
        &self,
        key: &ApiKey,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProjectRow> = projects::table
            .filter(projects::api_key.eq(key.as_ref()))
            .select(ProjectRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_project).transpose()
    }

    async fn update_owned(
        &self,
        owner: UserId,
        id: ProjectId,
        changes: ProjectChanges,
    ) -> Result<Project, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if changes.name.is_none() && changes.domain.is_none() {
            // Nothing to set; Diesel rejects an empty changeset.
            return self
                .find_owned(owner, id)
                .await?
                .ok_or(ProjectRepositoryError::NotFound);
        }
        let changeset = ProjectRowChanges {
            name: changes.name.as_deref(),
            domain: changes.domain.as_deref(),
        };
        let row: ProjectRow = diesel::update(
            projects::table
                .filter(projects::id.eq(id.as_uuid()))
                .filter(projects::owner_id.eq(owner.as_uuid())),
        )
        .set(&changeset)
        .returning(ProjectRow::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        row_to_project(row)
    }

    async fn set_api_key(
        &self,
        owner: UserId,
        id: ProjectId,
        key: ApiKey,
    ) -> Result<Project, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: ProjectRow = diesel::update(
            projects::table
                .filter(projects::id.eq(id.as_uuid()))
                .filter(projects::owner_id.eq(owner.as_uuid())),
        )
        .set(projects::api_key.eq(key.as_ref()))
        .returning(ProjectRow::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        row_to_project(row)
    }

    async fn delete_owned(
        &self,
        owner: UserId,
        id: ProjectId,
    ) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            projects::table
                .filter(projects::id.eq(id.as_uuid()))
                .filter(projects::owner_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        if deleted == 0 {
            return Err(ProjectRepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_unavailable() {
        let err = map_pool_error(PoolError::build("invalid URL"));
        assert!(matches!(err, ProjectRepositoryError::Unavailable { .. }));
    }

    #[rstest]
    fn not_found_maps_through() {
        assert!(matches!(
            map_diesel_error(diesel::result::Error::NotFound),
            ProjectRepositoryError::NotFound
        ));
    }

    #[rstest]
    fn corrupt_api_key_surfaces_as_store_error() {
        let row = ProjectRow {
            id: uuid::Uuid::new_v4(),
            owner_id: uuid::Uuid::new_v4(),
            name: "Site".to_owned(),
            domain: "x.io".to_owned(),
            api_key: "not-a-key".to_owned(),
            created_at: Utc::now(),
        };
        assert!(matches!(
            row_to_project(row),
            Err(ProjectRepositoryError::Unavailable { .. })
        ));
    }

    #[rstest]
    fn valid_row_converts() {
        let key = ApiKey::generate();
        let row = ProjectRow {
            id: uuid::Uuid::new_v4(),
            owner_id: uuid::Uuid::new_v4(),
            name: "Site".to_owned(),
            domain: "x.io".to_owned(),
            api_key: key.as_ref().to_owned(),
            created_at: Utc::now(),
        };
        let project = row_to_project(row).expect("converts");
        assert_eq!(project.api_key, key);
    }
}
