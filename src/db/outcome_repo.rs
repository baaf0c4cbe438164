use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::Outcome;
use crate::store::OutcomeStore;

pub struct PgOutcomeStore {
    pool: PgPool,
}

impl PgOutcomeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OutcomeStore for PgOutcomeStore {
    async fn load_outcomes(&self, prediction_id: &str) -> anyhow::Result<Vec<Outcome>> {
        let outcomes = sqlx::query_as::<_, Outcome>(
            r#"
            SELECT id, title, total_points, total_users, "index"
            FROM prediction_outcomes
            WHERE prediction_id = $1
            "#,
        )
        .bind(prediction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(outcomes)
    }
}
