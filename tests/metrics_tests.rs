mod common;

use common::{discord_sub, prediction, Harness, MockWebhookClient};
use predalert::dispatch::DispatchSummary;
use predalert::models::PredictionStatus;

// Lives in its own test binary: the Prometheus recorder is process-global and
// may only be installed once.
#[tokio::test]
async fn received_events_are_counted_even_when_the_status_gate_drops_them() {
    let handle = predalert::metrics::init_metrics();

    let h = Harness::new(MockWebhookClient::new());
    h.subscriptions.insert(discord_sub("chan-x", true, vec![], "wh-1"));
    h.outcomes.insert("p1", common::two_outcomes());

    h.dispatcher
        .on_prediction_created("p1", &prediction("chan-x", PredictionStatus::Active))
        .await
        .expect("create dispatch should succeed");

    // Unchanged status: the update is a no-op downstream but still an event.
    let same = prediction("chan-x", PredictionStatus::Active);
    let summary = h
        .dispatcher
        .on_prediction_updated("p1", &same, &same)
        .await
        .expect("gated update should succeed");
    assert_eq!(summary, DispatchSummary::default());

    let scrape = handle.render();
    assert!(
        scrape.contains("prediction_events_total 2"),
        "expected both events counted, got:\n{scrape}"
    );
}
