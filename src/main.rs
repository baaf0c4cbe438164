use std::sync::Arc;

use predalert::actions::{DiscordExecutor, SheetsExecutor};
use predalert::api::router::create_router;
use predalert::clients::{DiscordWebhookClient, SheetsApiClient};
use predalert::config::AppConfig;
use predalert::db::{self, PgCorrelationStore, PgOutcomeStore, PgSubscriptionStore};
use predalert::dispatch::{Dispatcher, ExecutorRegistry};
use predalert::{metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    let metrics_handle = metrics::init_metrics();

    tracing::info!("Connecting to database...");
    let db = db::init_pool(&config.database_url).await?;
    tracing::info!("Database connected");

    // Outbound collaborators share one HTTP connection pool.
    let http = reqwest::Client::new();
    let discord = Arc::new(DiscordWebhookClient::new(http.clone()));
    if config.sheets_access_token.is_none() {
        tracing::warn!("SHEETS_ACCESS_TOKEN not set — spreadsheet appends will be rejected");
    }
    let sheets = Arc::new(SheetsApiClient::new(
        http,
        config.sheets_access_token.clone(),
    ));

    let registry = ExecutorRegistry::new()
        .register(Arc::new(DiscordExecutor::new(discord)))
        .register(Arc::new(SheetsExecutor::new(sheets)));

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(PgSubscriptionStore::new(db.clone())),
        Arc::new(PgOutcomeStore::new(db.clone())),
        Arc::new(PgCorrelationStore::new(db.clone())),
        registry,
    ));

    let state = AppState {
        db,
        config,
        metrics_handle,
        dispatcher,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
