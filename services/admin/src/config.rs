use serde::Deserialize;

use backoffice_core::config::Config;

/// Back-office service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3120). Env var: `ADMIN_PORT`.
    #[serde(default = "default_admin_port")]
    pub admin_port: u16,
}

fn default_admin_port() -> u16 {
    3120
}

impl Config for AdminConfig {}
