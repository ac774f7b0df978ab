//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` primary connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// `PostgreSQL` read replica connection string, used for order history and book listings
    #[arg(long, env = "REPLICA_DATABASE_URL", hide_env_values = true)]
    pub replica_database_url: Option<String>,
}
