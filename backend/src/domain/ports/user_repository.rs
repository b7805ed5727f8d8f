//! Outbound port for user account storage.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::user::{EmailAddress, User, UserId};
use crate::domain::password::PasswordHash;

/// Failures surfaced by [`UserRepository`] implementations.
#[derive(Debug, Error)]
pub enum UserRepositoryError {
    /// Another account already holds the email address.
    #[error("email address is already registered")]
    DuplicateEmail,
    /// No user matches the identifier.
    #[error("user not found")]
    NotFound,
    /// The backing store is unreachable or misbehaving.
    #[error("user store unavailable: {message}")]
    Unavailable { message: String },
}

impl UserRepositoryError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

impl From<UserRepositoryError> for crate::domain::Error {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::DuplicateEmail => {
                Self::duplicate_email("Email already registered")
            }
            UserRepositoryError::NotFound => Self::not_found("User not found"),
            UserRepositoryError::Unavailable { message } => {
                tracing::error!(%message, "user store unavailable");
                Self::service_unavailable("Service temporarily unavailable")
            }
        }
    }
}

/// Storage abstraction for user accounts.
///
/// ## Invariants
/// - Email uniqueness is enforced by the store itself, not by callers, so a
///   concurrent duplicate registration still yields [`UserRepositoryError::DuplicateEmail`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. Fails with `DuplicateEmail` when the email is taken.
    async fn insert(&self, user: User) -> Result<(), UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by exact email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Replace the user's display name.
    async fn update_name(&self, id: UserId, name: String) -> Result<User, UserRepositoryError>;

    /// Replace the user's password digest.
    async fn update_password(
        &self,
        id: UserId,
        password: PasswordHash,
    ) -> Result<(), UserRepositoryError>;

    /// Remove the user record.
    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError>;
}
