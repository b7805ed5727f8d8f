//! Server configuration from the environment.

use std::env;

/// Settings the binary reads at startup.
///
/// - `DATAPULSE_ADDR` — listen address, default `0.0.0.0:3001`
/// - `DATABASE_URL` — PostgreSQL URL; when unset the in-memory stores are
///   used
/// - `DATAPULSE_DEMO_SEED` — `1`/`true` seeds demo data at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub database_url: Option<String>,
    pub demo_seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3001".to_owned(),
            database_url: None,
            demo_seed: false,
        }
    }
}

impl ServerConfig {
    /// Read the configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env::var("DATAPULSE_ADDR").unwrap_or(defaults.bind_addr),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            demo_seed: env::var("DATAPULSE_DEMO_SEED")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.demo_seed),
        }
    }

    /// Override the listen address.
    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// Override the database URL.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Enable or disable demo seeding.
    pub fn with_demo_seed(mut self, demo_seed: bool) -> Self {
        self.demo_seed = demo_seed;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn defaults_bind_locally_without_a_database() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:3001");
        assert!(config.database_url.is_none());
        assert!(!config.demo_seed);
    }

    #[test]
    fn builder_overrides_apply() {
        let config = ServerConfig::default()
            .with_bind_addr("127.0.0.1:9000")
            .with_database_url("postgres://localhost/datapulse")
            .with_demo_seed(true);
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/datapulse")
        );
        assert!(config.demo_seed);
    }
}
