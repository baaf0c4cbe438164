pub mod correlation_repo;
pub mod outcome_repo;
pub mod subscription_repo;

pub use correlation_repo::PgCorrelationStore;
pub use outcome_repo::PgOutcomeStore;
pub use subscription_repo::PgSubscriptionStore;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub async fn init_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    // Verify connectivity
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}
