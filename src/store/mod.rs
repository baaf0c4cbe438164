//! Persistence contracts the dispatch core depends on. Backend agnostic:
//! Postgres implementations live in [`crate::db`], in-memory ones in
//! [`memory`] for tests and local development.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{ActionKind, Outcome, PredictionStatus, Subscription};

/// Which event a subscription must be configured for to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFilter {
    /// The prediction was just created (`on_create` subscriptions).
    Create,
    /// The prediction transitioned into this status (`on_update` set).
    Update(PredictionStatus),
}

#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Subscriptions for `channel_id` matching `event`, restricted to action
    /// kinds in `kinds`. Unpaginated: a channel's subscription set is assumed
    /// to fit in one result page (scale bound, not a correctness one).
    async fn query(
        &self,
        channel_id: &str,
        event: EventFilter,
        kinds: &[ActionKind],
    ) -> anyhow::Result<Vec<Subscription>>;
}

#[async_trait]
pub trait OutcomeStore: Send + Sync {
    /// Child outcomes of a prediction, in no particular order; the dispatcher
    /// sorts by index before fan-out.
    async fn load_outcomes(&self, prediction_id: &str) -> anyhow::Result<Vec<Outcome>>;
}

/// Correlation tokens (posted message ids) keyed by subscription + record,
/// written by the create step and read back by the update step.
#[async_trait]
pub trait CorrelationStore: Send + Sync {
    async fn get(&self, subscription_id: Uuid, prediction_id: &str)
        -> anyhow::Result<Option<String>>;

    /// Upsert, so a redelivered create event replaces the token.
    async fn set(
        &self,
        subscription_id: Uuid,
        prediction_id: &str,
        token: &str,
    ) -> anyhow::Result<()>;
}
