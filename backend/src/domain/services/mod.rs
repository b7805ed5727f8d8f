//! Domain services orchestrating the outbound ports.

pub mod identity;
pub mod ingestion;
pub mod submissions_query;
pub mod tenancy;

pub use identity::{AuthenticatedSession, IdentityService};
pub use ingestion::IngestionService;
pub use submissions_query::SubmissionQueryService;
pub use tenancy::{ProjectEdit, ProjectOverview, TenantService};
