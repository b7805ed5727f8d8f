//! Server construction and wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use tracing::info;

use datapulse_backend::demo_seed;
use datapulse_backend::inbound::http::{self, HttpState};
use datapulse_backend::outbound::persistence::{DbPool, PoolConfig};
use datapulse_backend::Trace;

fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .configure(http::configure)
}

/// Wire handler state from the configuration: Diesel adapters when a
/// database URL is present, in-memory stores otherwise.
async fn build_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    match &config.database_url {
        Some(url) => {
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|err| std::io::Error::other(format!("database pool: {err}")))?;
            info!("using PostgreSQL persistence");
            Ok(HttpState::with_pool(pool))
        }
        None => {
            info!("no DATABASE_URL configured, using in-memory stores");
            Ok(HttpState::in_memory())
        }
    }
}

/// Construct the HTTP server from the given configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the pool cannot be built, seeding
/// fails, or the socket cannot be bound.
pub async fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let state = build_state(&config).await?;

    if config.demo_seed {
        demo_seed::seed(&state)
            .await
            .map_err(|err| std::io::Error::other(format!("demo seed: {err}")))?;
    }

    let data = web::Data::new(state);
    let server = HttpServer::new(move || build_app(data.clone()))
        .bind(&config.bind_addr)?
        .run();
    info!(addr = %config.bind_addr, "listening");
    Ok(server)
}
