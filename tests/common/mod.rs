// Shared across test binaries; not every binary uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use predalert::actions::{DiscordExecutor, SheetsExecutor};
use predalert::clients::{ChatWebhookClient, Embed, MentionPolicy, SpreadsheetClient};
use predalert::dispatch::{Dispatcher, ExecutorRegistry};
use predalert::errors::ClientError;
use predalert::lookup::{OutcomeLookup, PredictionCell, PredictionLookup};
use predalert::models::{
    Action, DiscordWebhookAction, EmojiRef, GameRef, GoogleSpreadsheetAction, Outcome, Prediction,
    PredictionStatus, Subscription, TwitchUser,
};
use predalert::store::memory::{
    MemoryCorrelationStore, MemoryOutcomeStore, MemorySubscriptionStore,
};

// ---------------------------------------------------------------------------
// Mock collaborator clients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub target_id: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct RecordedPatch {
    pub target_id: String,
    pub message_id: String,
    pub embed: Embed,
}

/// Records webhook traffic; simulates a transport outage for one target id.
#[derive(Debug, Default)]
pub struct MockWebhookClient {
    pub posts: Mutex<Vec<RecordedPost>>,
    pub patches: Mutex<Vec<RecordedPatch>>,
    pub fail_target: Option<String>,
    next_id: AtomicU64,
}

impl MockWebhookClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(target_id: &str) -> Self {
        Self {
            fail_target: Some(target_id.to_string()),
            ..Self::default()
        }
    }

    fn outage(&self, target_id: &str) -> Result<(), ClientError> {
        if self.fail_target.as_deref() == Some(target_id) {
            return Err(ClientError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                detail: "simulated outage".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ChatWebhookClient for MockWebhookClient {
    async fn post(
        &self,
        target_id: &str,
        _token: &str,
        content: &str,
        _mentions: &MentionPolicy,
    ) -> Result<String, ClientError> {
        self.outage(target_id)?;
        self.posts.lock().unwrap().push(RecordedPost {
            target_id: target_id.to_string(),
            content: content.to_string(),
        });
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("msg-{n}"))
    }

    async fn patch(
        &self,
        target_id: &str,
        _token: &str,
        message_id: &str,
        embed: &Embed,
    ) -> Result<(), ClientError> {
        self.outage(target_id)?;
        self.patches.lock().unwrap().push(RecordedPatch {
            target_id: target_id.to_string(),
            message_id: message_id.to_string(),
            embed: embed.clone(),
        });
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRow {
    pub sheet_id: String,
    pub range: String,
    pub row: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MockSheetsClient {
    pub rows: Mutex<Vec<RecordedRow>>,
}

impl MockSheetsClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SpreadsheetClient for MockSheetsClient {
    async fn append_row(
        &self,
        sheet_id: &str,
        range: &str,
        row: &[String],
    ) -> Result<(), ClientError> {
        self.rows.lock().unwrap().push(RecordedRow {
            sheet_id: sheet_id.to_string(),
            range: range.to_string(),
            row: row.to_vec(),
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct Harness {
    pub subscriptions: Arc<MemorySubscriptionStore>,
    pub outcomes: Arc<MemoryOutcomeStore>,
    pub correlations: Arc<MemoryCorrelationStore>,
    pub webhook: Arc<MockWebhookClient>,
    pub sheets: Arc<MockSheetsClient>,
    pub dispatcher: Dispatcher,
}

impl Harness {
    /// Dispatcher with both executors registered.
    pub fn new(webhook: MockWebhookClient) -> Self {
        Self::build(webhook, true)
    }

    /// Dispatcher with only the Discord executor registered.
    pub fn discord_only(webhook: MockWebhookClient) -> Self {
        Self::build(webhook, false)
    }

    fn build(webhook: MockWebhookClient, with_sheets: bool) -> Self {
        let subscriptions = Arc::new(MemorySubscriptionStore::default());
        let outcomes = Arc::new(MemoryOutcomeStore::new());
        let correlations = Arc::new(MemoryCorrelationStore::new());
        let webhook = Arc::new(webhook);
        let sheets = Arc::new(MockSheetsClient::new());

        let mut registry =
            ExecutorRegistry::new().register(Arc::new(DiscordExecutor::new(webhook.clone())));
        if with_sheets {
            registry = registry.register(Arc::new(SheetsExecutor::new(sheets.clone())));
        }

        let dispatcher = Dispatcher::new(
            subscriptions.clone(),
            outcomes.clone(),
            correlations.clone(),
            registry,
        );

        Self {
            subscriptions,
            outcomes,
            correlations,
            webhook,
            sheets,
            dispatcher,
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn prediction(channel_id: &str, status: PredictionStatus) -> Prediction {
    let ended = matches!(
        status,
        PredictionStatus::Resolved | PredictionStatus::Canceled
    );
    Prediction {
        channel_id: channel_id.to_string(),
        created_at: Utc.with_ymd_and_hms(2023, 6, 29, 18, 0, 0).unwrap(),
        created_by: TwitchUser {
            id: "u1".into(),
            display_name: "Streamer".into(),
        },
        locked_at: None,
        ended_at: ended.then(|| Utc.with_ymd_and_hms(2023, 6, 29, 18, 10, 0).unwrap()),
        ended_by: None,
        game: GameRef {
            id: 509658,
            name: "Just Chatting".into(),
        },
        status,
        title: "Will we win?".into(),
        winning_outcome_id: None,
        prediction_window_seconds: 300,
    }
}

pub fn outcome(id: &str, title: &str, points: i64, users: i64, index: i64) -> Outcome {
    Outcome {
        id: id.to_string(),
        title: title.to_string(),
        total_points: points,
        total_users: users,
        index,
    }
}

pub fn two_outcomes() -> Vec<Outcome> {
    vec![
        outcome("o1", "Yes", 60, 6, 1),
        outcome("o2", "No", 40, 4, 2),
    ]
}

pub fn discord_sub(
    channel_id: &str,
    on_create: bool,
    on_update: Vec<PredictionStatus>,
    webhook_id: &str,
) -> Subscription {
    Subscription {
        id: Uuid::new_v4(),
        channel_id: channel_id.to_string(),
        on_create,
        on_update,
        owner: "owner".into(),
        action: Action::DiscordWebhook(DiscordWebhookAction {
            id: webhook_id.to_string(),
            token: "tok".into(),
            role: "12345".into(),
            outcome_emojis: vec![
                EmojiRef {
                    name: "predBlue".into(),
                    id: "111".into(),
                },
                EmojiRef {
                    name: "predPink".into(),
                    id: "222".into(),
                },
                EmojiRef {
                    name: "predGrey".into(),
                    id: "333".into(),
                },
            ],
        }),
    }
}

pub fn sheets_sub(
    channel_id: &str,
    on_create: bool,
    on_update: Vec<PredictionStatus>,
    sheet_id: &str,
) -> Subscription {
    Subscription {
        id: Uuid::new_v4(),
        channel_id: channel_id.to_string(),
        on_create,
        on_update,
        owner: "owner".into(),
        action: Action::GoogleSpreadsheet(GoogleSpreadsheetAction {
            id: sheet_id.to_string(),
            range: "Predictions!A:Z".into(),
            time_zone: None,
            prediction_cells: vec![
                PredictionCell::Field(PredictionLookup::Title),
                PredictionCell::WinningOutcomeIndex,
            ],
            outcome_cells: vec![OutcomeLookup::Title, OutcomeLookup::TotalPoints],
        }),
    }
}
