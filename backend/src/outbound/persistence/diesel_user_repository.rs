//! PostgreSQL-backed `UserRepository` implementation using Diesel.
//!
//! Email uniqueness is enforced by the `users_email_key` index; a unique
//! violation on insert is surfaced as `DuplicateEmail` so registration races
//! resolve at the store.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::password::PasswordHash;
use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::{EmailAddress, User, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserRepositoryError::unavailable(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

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
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserRepositoryError::DuplicateEmail
        }
        DieselError::NotFound => UserRepositoryError::NotFound,
        _ => UserRepositoryError::unavailable("database error"),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let email = EmailAddress::new(row.email).map_err(|err| {
        UserRepositoryError::unavailable(format!("corrupt email in user row: {err}"))
    })?;
    let password = PasswordHash::decode(&row.password_hash).map_err(|err| {
        UserRepositoryError::unavailable(format!("corrupt password hash in user row: {err}"))
    })?;
    Ok(User {
        id: UserId::from_uuid(row.id),
        name: row.name,
        email,
        password,
        created_at: row.created_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let password_hash = user.password.encode();
        let row = NewUserRow {
            id: *user.id.as_uuid(),
            name: &user.name,
            email: user.email.as_ref(),
            password_hash: &password_hash,
            created_at: user.created_at,
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn update_name(&self, id: UserId, name: String) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: UserRow = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(users::name.eq(&name))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_user(row)
    }

    async fn update_password(
        &self,
        id: UserId,
        password: PasswordHash,
    ) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(users::password_hash.eq(password.encode()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(UserRepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(users::table.filter(users::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if deleted == 0 {
            return Err(UserRepositoryError::NotFound);
        }
        Ok(())
    }
}
