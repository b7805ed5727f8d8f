//! Core domain: value types, ports, and the services behind the HTTP
//! surface.

pub mod error;
pub mod password;
pub mod ports;
pub mod project;
pub mod services;
pub mod session;
pub mod submission;
pub mod user;

pub use error::{Error, ErrorCode};
pub use password::{PasswordHash, PlainPassword};
pub use project::{ApiKey, Project, ProjectId};
pub use services::{
    AuthenticatedSession, IdentityService, IngestionService, ProjectEdit, ProjectOverview,
    SubmissionQueryService, TenantService,
};
pub use session::SessionToken;
pub use submission::{NewSubmission, Submission, SubmissionId};
pub use user::{EmailAddress, User, UserId, UserProfile};
