//! Application configuration

use std::env;

use account_service::AccountServiceConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API port
    pub port: u16,
    /// Keep accounts in memory instead of PostgreSQL
    pub use_in_memory: bool,
    /// Apply migrations on startup
    pub run_migrations: bool,
    /// Account service settings
    pub service: AccountServiceConfig,
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn new() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            use_in_memory: flag("USE_IN_MEMORY"),
            run_migrations: flag("RUN_MIGRATIONS"),
            service: AccountServiceConfig::from_env(),
        }
    }

    /// Default listening address
    pub fn addr(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}
