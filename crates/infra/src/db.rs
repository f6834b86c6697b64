//! Postgres pool bootstrap and schema.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// DDL for the single table this service owns.
pub const STOCKS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS stocks (
    stockid BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    price DOUBLE PRECISION NOT NULL,
    company TEXT NOT NULL
)
"#;

/// Open a bounded connection pool and verify the database is reachable.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        acquire_timeout_ms = config.acquire_timeout.as_millis() as u64,
        "connected to postgres"
    );
    Ok(pool)
}

/// Create the `stocks` table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(STOCKS_SCHEMA).execute(pool).await?;
    Ok(())
}
