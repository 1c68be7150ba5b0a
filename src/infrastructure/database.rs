use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

/// Opens the PostgreSQL pool with the configured size and recycle interval
pub async fn connect(config: &Config, database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .max_lifetime(config.max_lifetime)
        .acquire_timeout(config.acquire_timeout)
        .connect(database_url)
        .await
}
