//! Persistence adapters implementing the domain's storage ports.
//!
//! Two families: Diesel adapters against PostgreSQL, and in-memory adapters
//! used when no database is configured and by tests.

pub mod diesel_project_repository;
pub mod diesel_submission_repository;
pub mod diesel_user_repository;
pub mod memory;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_submission_repository::DieselSubmissionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use memory::{InMemoryProjectRepository, InMemorySubmissionRepository, InMemoryUserRepository};
pub use pool::{DbPool, PoolConfig, PoolError};
