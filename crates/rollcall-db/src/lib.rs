//! # Rollcall DB
//!
//! PostgreSQL connection pool for the Rollcall API.
//!
//! The pool is created once at startup and handed to request handlers
//! through the application state. It is bounded by
//! `DATABASE_MAX_CONNECTIONS`, waiting for a free connection gives up after
//! `DATABASE_ACQUIRE_TIMEOUT_SECS`, and every connection runs with a
//! Postgres `statement_timeout`.
//!
//! # Example
//!
//! ```ignore
//! use rollcall_config::DatabaseConfig;
//! use rollcall_db::init_db_pool;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//!     sqlx::migrate!().run(&pool).await?;
//!     Ok(())
//! }
//! ```

use std::str::FromStr;

use rollcall_config::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects the pool and checks it with a round trip to the server.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!(host = %config.host(), "Connecting to PostgreSQL");

    let statement_timeout = config.statement_timeout.as_millis().to_string();
    let connect_options = PgConnectOptions::from_str(&config.url)?
        .options([("statement_timeout", statement_timeout.as_str())]);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(connect_options)
        .await?;

    let now: String = sqlx::query_scalar("SELECT NOW()::text")
        .fetch_one(&pool)
        .await?;
    tracing::info!(server_time = %now, "Database connected");

    Ok(pool)
}
