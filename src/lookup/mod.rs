//! Declarative field lookups: closed token enums that project a prediction or
//! outcome field into an external payload. Tokens outside the enums fail at
//! configuration parse time, never at dispatch time.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::{Outcome, Prediction};

/// A resolved field value. `Absent` means the path was structurally valid but
/// the value is unset (e.g. `ended_by` on a still-active prediction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupValue {
    Text(String),
    Int(i64),
    Timestamp(DateTime<Utc>),
    Absent,
}

impl LookupValue {
    fn opt_text(v: Option<&str>) -> Self {
        v.map_or(LookupValue::Absent, |s| LookupValue::Text(s.to_string()))
    }

    fn opt_timestamp(v: Option<DateTime<Utc>>) -> Self {
        v.map_or(LookupValue::Absent, LookupValue::Timestamp)
    }
}

// ---------------------------------------------------------------------------
// Prediction lookups
// ---------------------------------------------------------------------------

/// Every addressable field of a prediction, including the fixed dotted paths
/// into the creator/ender identities and the game reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionLookup {
    #[serde(rename = "channel_id")]
    ChannelId,
    #[serde(rename = "created_at")]
    CreatedAt,
    #[serde(rename = "locked_at")]
    LockedAt,
    #[serde(rename = "ended_at")]
    EndedAt,
    #[serde(rename = "status")]
    Status,
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "winning_outcome_id")]
    WinningOutcomeId,
    #[serde(rename = "prediction_window_seconds")]
    PredictionWindowSeconds,
    #[serde(rename = "created_by.id")]
    CreatedById,
    #[serde(rename = "created_by.display_name")]
    CreatedByDisplayName,
    #[serde(rename = "ended_by.id")]
    EndedById,
    #[serde(rename = "ended_by.display_name")]
    EndedByDisplayName,
    #[serde(rename = "game.id")]
    GameId,
    #[serde(rename = "game.name")]
    GameName,
}

impl PredictionLookup {
    pub fn resolve(&self, p: &Prediction) -> LookupValue {
        match self {
            PredictionLookup::ChannelId => LookupValue::Text(p.channel_id.clone()),
            PredictionLookup::CreatedAt => LookupValue::Timestamp(p.created_at),
            PredictionLookup::LockedAt => LookupValue::opt_timestamp(p.locked_at),
            PredictionLookup::EndedAt => LookupValue::opt_timestamp(p.ended_at),
            PredictionLookup::Status => LookupValue::Text(p.status.as_str().to_string()),
            PredictionLookup::Title => LookupValue::Text(p.title.clone()),
            PredictionLookup::WinningOutcomeId => {
                LookupValue::opt_text(p.winning_outcome_id.as_deref())
            }
            PredictionLookup::PredictionWindowSeconds => {
                LookupValue::Int(p.prediction_window_seconds)
            }
            PredictionLookup::CreatedById => LookupValue::Text(p.created_by.id.clone()),
            PredictionLookup::CreatedByDisplayName => {
                LookupValue::Text(p.created_by.display_name.clone())
            }
            PredictionLookup::EndedById => {
                LookupValue::opt_text(p.ended_by.as_ref().map(|u| u.id.as_str()))
            }
            PredictionLookup::EndedByDisplayName => {
                LookupValue::opt_text(p.ended_by.as_ref().map(|u| u.display_name.as_str()))
            }
            PredictionLookup::GameId => LookupValue::Int(p.game.id),
            PredictionLookup::GameName => LookupValue::Text(p.game.name.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome lookups
// ---------------------------------------------------------------------------

/// Addressable fields of an outcome. Flat, no nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeLookup {
    Id,
    Title,
    TotalPoints,
    TotalUsers,
    Index,
}

impl OutcomeLookup {
    pub fn resolve(&self, o: &Outcome) -> LookupValue {
        match self {
            OutcomeLookup::Id => LookupValue::Text(o.id.clone()),
            OutcomeLookup::Title => LookupValue::Text(o.title.clone()),
            OutcomeLookup::TotalPoints => LookupValue::Int(o.total_points),
            OutcomeLookup::TotalUsers => LookupValue::Int(o.total_users),
            OutcomeLookup::Index => LookupValue::Int(o.index),
        }
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet cell templates
// ---------------------------------------------------------------------------

/// One prediction-side cell: either a real field lookup or the synthetic
/// winning-outcome-index pseudo-field resolved against the matched winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionCell {
    #[serde(rename = "winning_outcome_index")]
    WinningOutcomeIndex,
    #[serde(untagged)]
    Field(PredictionLookup),
}

/// Render a resolved value for a spreadsheet cell. Timestamps follow the
/// action's time zone (UTC when unset) in the en-US locale shape; absent
/// values render as the literal sentinel "NULL".
pub fn format_cell(value: &LookupValue, time_zone: Option<Tz>) -> String {
    match value {
        LookupValue::Absent => "NULL".to_string(),
        LookupValue::Text(s) => s.clone(),
        LookupValue::Int(n) => n.to_string(),
        LookupValue::Timestamp(ts) => {
            let tz = time_zone.unwrap_or(chrono_tz::UTC);
            ts.with_timezone(&tz)
                .format("%-m/%-d/%Y, %-I:%M:%S %p")
                .to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameRef, PredictionStatus, TwitchUser};
    use chrono::TimeZone;

    fn active_prediction() -> Prediction {
        Prediction {
            channel_id: "chan-1".into(),
            created_at: Utc.with_ymd_and_hms(2023, 6, 29, 18, 5, 7).unwrap(),
            created_by: TwitchUser {
                id: "u1".into(),
                display_name: "Streamer".into(),
            },
            locked_at: None,
            ended_at: None,
            ended_by: None,
            game: GameRef {
                id: 509658,
                name: "Just Chatting".into(),
            },
            status: PredictionStatus::Active,
            title: "Will we win?".into(),
            winning_outcome_id: None,
            prediction_window_seconds: 300,
        }
    }

    #[test]
    fn unset_optional_fields_resolve_to_absent() {
        let p = active_prediction();
        for lookup in [
            PredictionLookup::LockedAt,
            PredictionLookup::EndedAt,
            PredictionLookup::EndedById,
            PredictionLookup::EndedByDisplayName,
            PredictionLookup::WinningOutcomeId,
        ] {
            assert_eq!(lookup.resolve(&p), LookupValue::Absent, "{lookup:?}");
        }
    }

    #[test]
    fn dotted_paths_resolve_nested_fields() {
        let p = active_prediction();
        assert_eq!(
            PredictionLookup::GameName.resolve(&p),
            LookupValue::Text("Just Chatting".into())
        );
        assert_eq!(
            PredictionLookup::CreatedById.resolve(&p),
            LookupValue::Text("u1".into())
        );
        assert_eq!(PredictionLookup::GameId.resolve(&p), LookupValue::Int(509658));
    }

    #[test]
    fn tokens_round_trip_their_wire_names() {
        let parsed: PredictionLookup = serde_json::from_str("\"created_by.id\"").unwrap();
        assert_eq!(parsed, PredictionLookup::CreatedById);
        let parsed: PredictionCell = serde_json::from_str("\"winning_outcome_index\"").unwrap();
        assert_eq!(parsed, PredictionCell::WinningOutcomeIndex);
        let parsed: PredictionCell = serde_json::from_str("\"game.name\"").unwrap();
        assert_eq!(parsed, PredictionCell::Field(PredictionLookup::GameName));
    }

    #[test]
    fn unknown_tokens_fail_to_parse() {
        assert!(serde_json::from_str::<PredictionLookup>("\"game.publisher\"").is_err());
        assert!(serde_json::from_str::<OutcomeLookup>("\"color\"").is_err());
        assert!(serde_json::from_str::<PredictionCell>("\"outcomes.BLUE.title\"").is_err());
    }

    #[test]
    fn absent_formats_as_null_sentinel() {
        assert_eq!(format_cell(&LookupValue::Absent, None), "NULL");
    }

    #[test]
    fn timestamps_format_in_the_configured_zone() {
        let ts = Utc.with_ymd_and_hms(2023, 6, 29, 18, 5, 7).unwrap();
        assert_eq!(
            format_cell(&LookupValue::Timestamp(ts), None),
            "6/29/2023, 6:05:07 PM"
        );
        assert_eq!(
            format_cell(
                &LookupValue::Timestamp(ts),
                Some(chrono_tz::America::New_York)
            ),
            "6/29/2023, 2:05:07 PM"
        );
    }
}
