//! Shared handler state: the domain services behind the HTTP surface.

use std::sync::Arc;

use crate::domain::ports::{
    InMemorySessionStore, ProjectRepository, SessionStore, SubmissionRepository, UserRepository,
};
use crate::domain::{IdentityService, IngestionService, SubmissionQueryService, TenantService};
use crate::outbound::persistence::{
    DbPool, DieselProjectRepository, DieselSubmissionRepository, DieselUserRepository,
    InMemoryProjectRepository, InMemorySubmissionRepository, InMemoryUserRepository,
};

/// Everything the handlers need, cheap to clone per worker.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<IdentityService>,
    pub tenants: Arc<TenantService>,
    pub ingestion: Arc<IngestionService>,
    pub submissions: Arc<SubmissionQueryService>,
}

impl HttpState {
    fn assemble(
        users: Arc<dyn UserRepository>,
        projects: Arc<dyn ProjectRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            identity: Arc::new(IdentityService::new(users, sessions)),
            tenants: Arc::new(TenantService::new(
                Arc::clone(&projects),
                Arc::clone(&submissions),
            )),
            ingestion: Arc::new(IngestionService::new(
                Arc::clone(&projects),
                Arc::clone(&submissions),
            )),
            submissions: Arc::new(SubmissionQueryService::new(projects, submissions)),
        }
    }

    /// Wire the services over the Diesel adapters. Sessions stay in-process
    /// regardless of the backing store.
    pub fn with_pool(pool: DbPool) -> Self {
        Self::assemble(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselProjectRepository::new(pool.clone())),
            Arc::new(DieselSubmissionRepository::new(pool)),
            Arc::new(InMemorySessionStore::new()),
        )
    }

    /// Wire the services over the in-memory adapters. Used when no database
    /// is configured, and by tests.
    pub fn in_memory() -> Self {
        Self::assemble(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryProjectRepository::new()),
            Arc::new(InMemorySubmissionRepository::new()),
            Arc::new(InMemorySessionStore::new()),
        )
    }
}
