use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::CorrelationStore;

pub struct PgCorrelationStore {
    pool: PgPool,
}

impl PgCorrelationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CorrelationStore for PgCorrelationStore {
    async fn get(
        &self,
        subscription_id: Uuid,
        prediction_id: &str,
    ) -> anyhow::Result<Option<String>> {
        let token: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT message_id
            FROM correlations
            WHERE subscription_id = $1 AND prediction_id = $2
            "#,
        )
        .bind(subscription_id)
        .bind(prediction_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(token.map(|(t,)| t))
    }

    async fn set(
        &self,
        subscription_id: Uuid,
        prediction_id: &str,
        token: &str,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO correlations (subscription_id, prediction_id, message_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (subscription_id, prediction_id)
                DO UPDATE SET message_id = EXCLUDED.message_id, updated_at = NOW()
            "#,
        )
        .bind(subscription_id)
        .bind(prediction_id)
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
