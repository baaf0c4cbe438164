use crate::models::Subscription;
use crate::store::{EventFilter, SubscriptionStore};

use super::executor::ExecutorRegistry;

/// Find the subscriptions an event fans out to: same channel, event filter
/// satisfied, action kind restricted to what the registry can execute. A
/// subscription is matched at most once per event.
pub async fn match_subscriptions(
    store: &dyn SubscriptionStore,
    channel_id: &str,
    event: EventFilter,
    registry: &ExecutorRegistry,
) -> anyhow::Result<Vec<Subscription>> {
    let kinds = registry.eligible_kinds();
    if kinds.is_empty() {
        return Ok(Vec::new());
    }
    store.query(channel_id, event, &kinds).await
}
