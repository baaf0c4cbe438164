pub mod actions;
pub mod api;
pub mod clients;
pub mod config;
pub mod db;
pub mod dispatch;
pub mod errors;
pub mod lookup;
pub mod metrics;
pub mod models;
pub mod store;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::dispatch::Dispatcher;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    pub dispatcher: Arc<Dispatcher>,
}
