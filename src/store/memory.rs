//! In-memory store implementations for tests and local development.
//! Single-process only; no persistence.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use super::{CorrelationStore, EventFilter, OutcomeStore, SubscriptionStore};
use crate::models::{ActionKind, Outcome, Subscription};

/// Fixed list of subscriptions filtered in memory with the same predicate the
/// Postgres query applies.
#[derive(Debug, Default)]
pub struct MemorySubscriptionStore {
    subscriptions: RwLock<Vec<Subscription>>,
}

impl MemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, subscription: Subscription) {
        self.subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(subscription);
    }
}

#[async_trait]
impl SubscriptionStore for MemorySubscriptionStore {
    async fn query(
        &self,
        channel_id: &str,
        event: EventFilter,
        kinds: &[ActionKind],
    ) -> anyhow::Result<Vec<Subscription>> {
        let subs = self
            .subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(subs
            .iter()
            .filter(|s| s.channel_id == channel_id)
            .filter(|s| match event {
                EventFilter::Create => s.on_create,
                EventFilter::Update(status) => s.on_update.contains(&status),
            })
            .filter(|s| kinds.contains(&s.action.kind()))
            .cloned()
            .collect())
    }
}

/// Outcomes keyed by prediction id, returned in insertion order.
#[derive(Debug, Default)]
pub struct MemoryOutcomeStore {
    outcomes: RwLock<HashMap<String, Vec<Outcome>>>,
}

impl MemoryOutcomeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, prediction_id: &str, outcomes: Vec<Outcome>) {
        self.outcomes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(prediction_id.to_string(), outcomes);
    }
}

#[async_trait]
impl OutcomeStore for MemoryOutcomeStore {
    async fn load_outcomes(&self, prediction_id: &str) -> anyhow::Result<Vec<Outcome>> {
        let map = self.outcomes.read().unwrap_or_else(PoisonError::into_inner);
        Ok(map.get(prediction_id).cloned().unwrap_or_default())
    }
}

#[derive(Debug, Default)]
pub struct MemoryCorrelationStore {
    tokens: RwLock<HashMap<(Uuid, String), String>>,
}

impl MemoryCorrelationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CorrelationStore for MemoryCorrelationStore {
    async fn get(
        &self,
        subscription_id: Uuid,
        prediction_id: &str,
    ) -> anyhow::Result<Option<String>> {
        let map = self.tokens.read().unwrap_or_else(PoisonError::into_inner);
        Ok(map
            .get(&(subscription_id, prediction_id.to_string()))
            .cloned())
    }

    async fn set(
        &self,
        subscription_id: Uuid,
        prediction_id: &str,
        token: &str,
    ) -> anyhow::Result<()> {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((subscription_id, prediction_id.to_string()), token.to_string());
        Ok(())
    }
}
