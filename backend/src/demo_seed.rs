//! Opt-in demo data for local evaluation.
//!
//! Runs through the ordinary services rather than writing to the stores
//! directly, so seeding exercises exactly the code paths real traffic takes.
//! Enabled with `DATAPULSE_DEMO_SEED=1`.

use serde_json::json;
use tracing::{info, warn};

use crate::domain::{Error, NewSubmission};
use crate::inbound::http::HttpState;

const DEMO_NAME: &str = "Demo User";
const DEMO_EMAIL: &str = "demo@datapulse.io";
const DEMO_PASSWORD: &str = "demo123";

/// Seed a demo account, one project, and a handful of submissions.
///
/// Seeding an already-seeded store registers a duplicate email; that case is
/// logged and skipped rather than treated as a failure, so restarts against
/// a persistent database stay clean.
pub async fn seed(state: &HttpState) -> Result<(), Error> {
    let session = match state
        .identity
        .register(DEMO_NAME, DEMO_EMAIL, DEMO_PASSWORD)
        .await
    {
        Ok(session) => session,
        Err(err) if err.code == crate::domain::ErrorCode::DuplicateEmail => {
            info!("demo data already present, skipping seed");
            return Ok(());
        }
        Err(err) => return Err(err),
    };

    let project = state
        .tenants
        .create_project(session.profile.id, "Demo Website", "demo.datapulse.io")
        .await?;

    let samples = [
        NewSubmission {
            form_id: Some("contact".to_owned()),
            data: Some(json!({
                "name": "Jane Smith",
                "email": "jane@example.com",
                "message": "Interested in your services"
            })),
            page_url: Some("https://demo.datapulse.io/contact".to_owned()),
            user_agent: Some("Mozilla/5.0".to_owned()),
        },
        NewSubmission {
            form_id: Some("newsletter".to_owned()),
            data: Some(json!({ "email": "subscriber@example.com" })),
            page_url: Some("https://demo.datapulse.io/blog".to_owned()),
            user_agent: Some("Mozilla/5.0".to_owned()),
        },
        NewSubmission {
            form_id: Some("contact".to_owned()),
            data: Some(json!({
                "name": "Bob Jones",
                "email": "bob@example.com",
                "message": "Pricing question"
            })),
            page_url: Some("https://demo.datapulse.io/contact".to_owned()),
            user_agent: Some("Mozilla/5.0".to_owned()),
        },
    ];

    for sample in samples {
        if let Err(err) = state
            .ingestion
            .track(project.api_key.as_ref(), sample)
            .await
        {
            warn!(error = %err, "failed to seed demo submission");
        }
    }

    info!(
        project_id = %project.id,
        email = DEMO_EMAIL,
        "seeded demo account"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn seed_creates_account_project_and_submissions() {
        let state = HttpState::in_memory();
        seed(&state).await.expect("seed");

        let session = state
            .identity
            .login(DEMO_EMAIL, DEMO_PASSWORD)
            .await
            .expect("demo credentials work");
        let projects = state
            .tenants
            .list_projects(session.profile.id)
            .await
            .expect("list projects");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].project.name, "Demo Website");
        assert_eq!(projects[0].submission_count, 3);
    }

    #[tokio::test]
    async fn seeding_twice_is_idempotent() {
        let state = HttpState::in_memory();
        seed(&state).await.expect("first seed");
        seed(&state).await.expect("second seed is a no-op");

        let session = state
            .identity
            .login(DEMO_EMAIL, DEMO_PASSWORD)
            .await
            .expect("login");
        let projects = state
            .tenants
            .list_projects(session.profile.id)
            .await
            .expect("list projects");
        assert_eq!(projects.len(), 1);
    }
}
