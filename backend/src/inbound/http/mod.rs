//! Inbound HTTP adapter: Actix handlers, auth extraction, and the
//! domain-error → response mapping.

pub mod auth;
pub mod error;
pub mod health;
pub mod identity;
pub mod projects;
pub mod state;
pub mod submissions;
pub mod track;

#[cfg(test)]
pub mod test_utils;

pub use state::HttpState;

/// Handler result carrying the shared error envelope.
pub type ApiResult<T> = Result<T, crate::domain::Error>;

/// Register every route under `/api`.
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(
        actix_web::web::scope("/api")
            .service(health::health)
            .service(identity::register)
            .service(identity::login)
            .service(identity::update_profile)
            .service(identity::change_password)
            .service(identity::delete_account)
            .service(projects::list_projects)
            .service(projects::create_project)
            .service(projects::update_project)
            .service(projects::delete_project)
            .service(projects::regenerate_api_key)
            .service(track::track)
            .service(submissions::list_submissions)
            .service(submissions::get_submission),
    );
}
