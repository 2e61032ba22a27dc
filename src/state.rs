use anyhow::Context;
use sqlx::PgPool;

use crate::config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig, init_db_pool};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub server_config: ServerConfig,
    pub cors_config: CorsConfig,
}

/// Loads configuration and connects to the database.
///
/// A missing `JWT_SECRET` or `DATABASE_URL` is fatal.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    let db = init_db_pool(&db_config)
        .await
        .with_context(|| format!("Failed to connect to database at {}", db_config.host()))?;

    Ok(AppState {
        db,
        jwt_config,
        server_config: ServerConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    })
}
