//! Fan-out dispatcher: loads the event's outcomes, matches subscriptions and
//! runs every matched executor concurrently with settle-all semantics. One
//! subscription's failure never prevents or delays delivery to its siblings.

pub mod executor;
pub mod matcher;

pub use executor::{ActionExecutor, ExecutionInput, ExecutorRegistry};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use metrics::{counter, histogram};
use uuid::Uuid;

use crate::errors::ExecuteError;
use crate::models::Prediction;
use crate::store::{CorrelationStore, EventFilter, OutcomeStore, SubscriptionStore};

/// Per-event accounting returned to the caller and surfaced in the ingestion
/// response. Delivery failures are intentionally absent from the error path:
/// the producing event succeeds even when every notification failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DispatchSummary {
    pub matched: usize,
    pub delivered: usize,
    pub failed: usize,
}

pub struct Dispatcher {
    subscriptions: Arc<dyn SubscriptionStore>,
    outcomes: Arc<dyn OutcomeStore>,
    correlations: Arc<dyn CorrelationStore>,
    registry: ExecutorRegistry,
}

impl Dispatcher {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionStore>,
        outcomes: Arc<dyn OutcomeStore>,
        correlations: Arc<dyn CorrelationStore>,
        registry: ExecutorRegistry,
    ) -> Self {
        Self {
            subscriptions,
            outcomes,
            correlations,
            registry,
        }
    }

    /// Fires once per newly created prediction.
    pub async fn on_prediction_created(
        &self,
        prediction_id: &str,
        prediction: &Prediction,
    ) -> anyhow::Result<DispatchSummary> {
        counter!("prediction_events_total").increment(1);
        self.dispatch(prediction_id, prediction, EventFilter::Create)
            .await
    }

    /// Fires on every mutation. The status change between snapshots is the
    /// sole gate: content edits to other fields never trigger.
    pub async fn on_prediction_updated(
        &self,
        prediction_id: &str,
        before: &Prediction,
        after: &Prediction,
    ) -> anyhow::Result<DispatchSummary> {
        counter!("prediction_events_total").increment(1);
        if before.status == after.status {
            tracing::debug!(
                prediction = prediction_id,
                status = %after.status,
                "status unchanged, skipping update dispatch"
            );
            return Ok(DispatchSummary::default());
        }
        self.dispatch(prediction_id, after, EventFilter::Update(after.status))
            .await
    }

    async fn dispatch(
        &self,
        prediction_id: &str,
        prediction: &Prediction,
        event: EventFilter,
    ) -> anyhow::Result<DispatchSummary> {
        let start = Instant::now();

        let mut outcomes = self.outcomes.load_outcomes(prediction_id).await?;
        outcomes.sort_by_key(|o| o.index);

        let subs = matcher::match_subscriptions(
            self.subscriptions.as_ref(),
            &prediction.channel_id,
            event,
            &self.registry,
        )
        .await?;
        counter!("subscriptions_matched_total").increment(subs.len() as u64);

        if subs.is_empty() {
            tracing::debug!(
                prediction = prediction_id,
                channel = %prediction.channel_id,
                "no subscriptions matched"
            );
            return Ok(DispatchSummary::default());
        }

        // Update events reference the message posted at create time; fetch
        // the tokens up front so executors stay pure functions of their input.
        let mut tokens: HashMap<Uuid, String> = HashMap::new();
        if matches!(event, EventFilter::Update(_)) {
            for sub in &subs {
                if let Some(token) = self.correlations.get(sub.id, prediction_id).await? {
                    tokens.insert(sub.id, token);
                }
            }
        }

        // All-settle fan-out: every future resolves to a per-subscription
        // result, never short-circuiting on the first failure.
        let results = join_all(subs.iter().map(|sub| {
            let input = ExecutionInput {
                prediction_id,
                prediction,
                outcomes: &outcomes,
                correlation: tokens.get(&sub.id).map(String::as_str),
            };
            async move {
                let result = match self.registry.get(sub.action.kind()) {
                    Some(executor) => match event {
                        EventFilter::Create => executor.on_create(&sub.action, &input).await,
                        EventFilter::Update(_) => executor.on_update(&sub.action, &input).await,
                    },
                    None => Err(ExecuteError::UnregisteredKind(sub.action.kind())),
                };
                (sub, result)
            }
        }))
        .await;

        let mut summary = DispatchSummary {
            matched: subs.len(),
            ..Default::default()
        };
        let mut fatal: Option<ExecuteError> = None;

        for (sub, result) in results {
            match result {
                Ok(token) => {
                    summary.delivered += 1;
                    counter!("deliveries_total").increment(1);
                    if let (EventFilter::Create, Some(token)) = (event, token) {
                        if let Err(e) = self.correlations.set(sub.id, prediction_id, &token).await
                        {
                            tracing::error!(
                                subscription = %sub.id,
                                prediction = prediction_id,
                                error = %e,
                                "failed to persist correlation token"
                            );
                        }
                    }
                }
                Err(e) => {
                    summary.failed += 1;
                    counter!("delivery_failures_total").increment(1);
                    tracing::error!(
                        subscription = %sub.id,
                        kind = %sub.action.kind(),
                        prediction = prediction_id,
                        error = %e,
                        "subscription delivery failed"
                    );
                    if e.is_fatal() && fatal.is_none() {
                        fatal = Some(e);
                    }
                }
            }
        }

        histogram!("dispatch_latency_seconds").record(start.elapsed().as_secs_f64());

        tracing::info!(
            prediction = prediction_id,
            matched = summary.matched,
            delivered = summary.delivered,
            failed = summary.failed,
            "dispatch settled"
        );

        // Invariant violations are programming defects: surface them to the
        // caller, but only after every sibling has settled.
        if let Some(e) = fatal {
            return Err(anyhow::Error::new(e));
        }
        Ok(summary)
    }
}
