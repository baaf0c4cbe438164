pub mod outcome;
pub mod prediction;
pub mod subscription;

pub use outcome::Outcome;
pub use prediction::{GameRef, Prediction, TwitchUser};
pub use subscription::{
    Action, ActionKind, DiscordWebhookAction, EmojiRef, GoogleSpreadsheetAction, Subscription,
};

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PredictionStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a prediction. Transitions are driven entirely by the
/// upstream producer; this service only reacts to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictionStatus {
    Active,
    Locked,
    ResolvePending,
    Resolved,
    Canceled,
}

impl PredictionStatus {
    pub const ALL: [PredictionStatus; 5] = [
        PredictionStatus::Active,
        PredictionStatus::Locked,
        PredictionStatus::ResolvePending,
        PredictionStatus::Resolved,
        PredictionStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionStatus::Active => "ACTIVE",
            PredictionStatus::Locked => "LOCKED",
            PredictionStatus::ResolvePending => "RESOLVE_PENDING",
            PredictionStatus::Resolved => "RESOLVED",
            PredictionStatus::Canceled => "CANCELED",
        }
    }

    pub fn from_api_str(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(PredictionStatus::Active),
            "LOCKED" => Some(PredictionStatus::Locked),
            "RESOLVE_PENDING" => Some(PredictionStatus::ResolvePending),
            "RESOLVED" => Some(PredictionStatus::Resolved),
            "CANCELED" => Some(PredictionStatus::Canceled),
            _ => None,
        }
    }
}

impl fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
