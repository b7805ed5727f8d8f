//! Outbound ports: the storage traits the domain services depend on.
//!
//! Adapters under `outbound::persistence` implement these against Postgres
//! or process memory; services never see which.

pub mod project_repository;
pub mod session_store;
pub mod submission_repository;
pub mod user_repository;

pub use project_repository::{ProjectChanges, ProjectRepository, ProjectRepositoryError};
pub use session_store::{InMemorySessionStore, SessionStore, SessionStoreError};
pub use submission_repository::{SubmissionRepository, SubmissionRepositoryError};
pub use user_repository::{UserRepository, UserRepositoryError};
