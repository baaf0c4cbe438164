use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render))
        // Trigger ingestion — the hosting platform delivers lifecycle events here
        .route(
            "/events/predictions/:id/created",
            post(handlers::events::prediction_created),
        )
        .route(
            "/events/predictions/:id/updated",
            post(handlers::events::prediction_updated),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
