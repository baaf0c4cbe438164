use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::SpreadsheetClient;
use crate::dispatch::{ActionExecutor, ExecutionInput};
use crate::errors::ExecuteError;
use crate::lookup::{format_cell, LookupValue, PredictionCell};
use crate::models::{Action, ActionKind, GoogleSpreadsheetAction, Outcome, Prediction};

/// Appends one row per resolution: the prediction-side cells followed by the
/// outcome-side cells for each outcome in index order. Update events only.
pub struct SheetsExecutor {
    client: Arc<dyn SpreadsheetClient>,
}

impl SheetsExecutor {
    pub fn new(client: Arc<dyn SpreadsheetClient>) -> Self {
        Self { client }
    }
}

fn config(action: &Action) -> Result<&GoogleSpreadsheetAction, ExecuteError> {
    match action {
        Action::GoogleSpreadsheet(cfg) => Ok(cfg),
        other => Err(ExecuteError::Invariant(format!(
            "spreadsheet executor invoked with {} action",
            other.kind()
        ))),
    }
}

/// Project a prediction and its outcomes into a single row of cell strings.
pub fn build_row(
    cfg: &GoogleSpreadsheetAction,
    prediction: &Prediction,
    outcomes: &[Outcome],
) -> Vec<String> {
    let winner = prediction
        .winning_outcome_id
        .as_deref()
        .and_then(|id| outcomes.iter().find(|o| o.id == id));

    let mut row =
        Vec::with_capacity(cfg.prediction_cells.len() + outcomes.len() * cfg.outcome_cells.len());

    for cell in &cfg.prediction_cells {
        let value = match cell {
            PredictionCell::WinningOutcomeIndex => {
                winner.map_or(LookupValue::Absent, |o| LookupValue::Int(o.index))
            }
            PredictionCell::Field(lookup) => lookup.resolve(prediction),
        };
        row.push(format_cell(&value, cfg.time_zone));
    }
    for outcome in outcomes {
        for lookup in &cfg.outcome_cells {
            row.push(format_cell(&lookup.resolve(outcome), cfg.time_zone));
        }
    }
    row
}

#[async_trait]
impl ActionExecutor for SheetsExecutor {
    fn kind(&self) -> ActionKind {
        ActionKind::GoogleSpreadsheet
    }

    async fn on_create(
        &self,
        _action: &Action,
        _input: &ExecutionInput<'_>,
    ) -> Result<Option<String>, ExecuteError> {
        // This kind has no on-create behavior: rows are only appended once a
        // resolution exists to record.
        Ok(None)
    }

    async fn on_update(
        &self,
        action: &Action,
        input: &ExecutionInput<'_>,
    ) -> Result<Option<String>, ExecuteError> {
        let cfg = config(action)?;
        let row = build_row(cfg, input.prediction, input.outcomes);
        self.client.append_row(&cfg.id, &cfg.range, &row).await?;
        Ok(None)
    }
}
