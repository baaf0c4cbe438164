use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PredictionStatus;

/// Identity of the Twitch user who created or ended a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitchUser {
    pub id: String,
    pub display_name: String,
}

/// The game/category the channel was set to when the prediction ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRef {
    pub id: i64,
    pub name: String,
}

/// Snapshot of a prediction record as delivered by the upstream trigger.
/// Read-only here: created and mutated exclusively by the producer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub channel_id: String,
    pub created_at: DateTime<Utc>,
    pub created_by: TwitchUser,
    #[serde(default)]
    pub locked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ended_by: Option<TwitchUser>,
    pub game: GameRef,
    pub status: PredictionStatus,
    pub title: String,
    #[serde(default)]
    pub winning_outcome_id: Option<String>,
    pub prediction_window_seconds: i64,
}
