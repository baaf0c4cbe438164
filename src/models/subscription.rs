use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::PredictionStatus;
use crate::lookup::{OutcomeLookup, PredictionCell};

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// A stored alert configuration binding a channel and event filter to one
/// action. Managed by an external configuration surface; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub channel_id: String,
    /// Fire on prediction creation.
    pub on_create: bool,
    /// Fire when the prediction transitions into one of these statuses.
    #[serde(default)]
    pub on_update: Vec<PredictionStatus>,
    pub owner: String,
    pub action: Action,
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// The polymorphic external-effect configuration. Closed tagged union: adding
/// a kind means adding a variant here and registering an executor for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    DiscordWebhook(DiscordWebhookAction),
    GoogleSpreadsheet(GoogleSpreadsheetAction),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::DiscordWebhook(_) => ActionKind::DiscordWebhook,
            Action::GoogleSpreadsheet(_) => ActionKind::GoogleSpreadsheet,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    DiscordWebhook,
    GoogleSpreadsheet,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::DiscordWebhook => "discord_webhook",
            ActionKind::GoogleSpreadsheet => "google_spreadsheet",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A custom emoji reference, rendered as `<:name:id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiRef {
    pub name: String,
    pub id: String,
}

/// Discord webhook target plus message decoration. `outcome_emojis` is
/// ordered: entry N-1 decorates the outcome with index N.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordWebhookAction {
    pub id: String,
    pub token: String,
    /// Role id to mention in the announcement.
    pub role: String,
    pub outcome_emojis: Vec<EmojiRef>,
}

/// Google Sheets append target plus the declarative row projection: one list
/// of cells resolved against the prediction, one resolved against each
/// outcome in index order and flattened into the same row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleSpreadsheetAction {
    pub id: String,
    pub range: String,
    /// Time zone for timestamp cells; UTC when unset. Parsed at
    /// deserialization, so a bad zone name is rejected before dispatch.
    #[serde(default)]
    pub time_zone: Option<Tz>,
    pub prediction_cells: Vec<PredictionCell>,
    pub outcome_cells: Vec<OutcomeLookup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_deserializes_by_kind_tag() {
        let json = serde_json::json!({
            "kind": "discord_webhook",
            "id": "123",
            "token": "tok",
            "role": "456",
            "outcome_emojis": [
                { "name": "predBlue", "id": "111" },
                { "name": "predPink", "id": "222" }
            ]
        });
        let action: Action = serde_json::from_value(json).unwrap();
        assert_eq!(action.kind(), ActionKind::DiscordWebhook);
    }

    #[test]
    fn unknown_action_kind_is_rejected() {
        let json = serde_json::json!({ "kind": "carrier_pigeon", "id": "1" });
        assert!(serde_json::from_value::<Action>(json).is_err());
    }

    #[test]
    fn bad_time_zone_is_rejected_at_parse_time() {
        let json = serde_json::json!({
            "kind": "google_spreadsheet",
            "id": "sheet",
            "range": "A:Z",
            "time_zone": "Mars/Olympus_Mons",
            "prediction_cells": [],
            "outcome_cells": []
        });
        assert!(serde_json::from_value::<Action>(json).is_err());
    }
}
