use sqlx::PgPool;

pub struct HealthService;

impl HealthService {
    /// Round trip to the database. Returns the number of registered users.
    pub async fn check_database(db: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await
    }
}
