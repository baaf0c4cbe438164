use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Action, ActionKind, PredictionStatus, Subscription};
use crate::store::{EventFilter, SubscriptionStore};

#[derive(sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    channel_id: String,
    on_create: bool,
    on_update: Vec<String>,
    owner: String,
    action: Json<Action>,
}

impl SubscriptionRow {
    fn into_subscription(self) -> anyhow::Result<Subscription> {
        let on_update = self
            .on_update
            .iter()
            .map(|s| {
                PredictionStatus::from_api_str(s)
                    .ok_or_else(|| anyhow!("subscription {}: unknown status '{s}'", self.id))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Subscription {
            id: self.id,
            channel_id: self.channel_id,
            on_create: self.on_create,
            on_update,
            owner: self.owner,
            action: self.action.0,
        })
    }
}

pub struct PgSubscriptionStore {
    pool: PgPool,
}

impl PgSubscriptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for PgSubscriptionStore {
    async fn query(
        &self,
        channel_id: &str,
        event: EventFilter,
        kinds: &[ActionKind],
    ) -> anyhow::Result<Vec<Subscription>> {
        let kind_strs: Vec<String> = kinds.iter().map(|k| k.as_str().to_string()).collect();

        let rows = match event {
            EventFilter::Create => {
                sqlx::query_as::<_, SubscriptionRow>(
                    r#"
                    SELECT id, channel_id, on_create, on_update, owner, action
                    FROM subscriptions
                    WHERE channel_id = $1
                      AND on_create = TRUE
                      AND action->>'kind' = ANY($2)
                    "#,
                )
                .bind(channel_id)
                .bind(&kind_strs)
                .fetch_all(&self.pool)
                .await?
            }
            EventFilter::Update(status) => {
                sqlx::query_as::<_, SubscriptionRow>(
                    r#"
                    SELECT id, channel_id, on_create, on_update, owner, action
                    FROM subscriptions
                    WHERE channel_id = $1
                      AND $2 = ANY(on_update)
                      AND action->>'kind' = ANY($3)
                    "#,
                )
                .bind(channel_id)
                .bind(status.as_str())
                .bind(&kind_strs)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter()
            .map(SubscriptionRow::into_subscription)
            .collect()
    }
}
