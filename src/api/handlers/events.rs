use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::dispatch::DispatchSummary;
use crate::errors::AppError;
use crate::models::Prediction;
use crate::AppState;

/// Both snapshots of an updated prediction record, as delivered by the
/// upstream trigger.
#[derive(Debug, Deserialize)]
pub struct UpdateEnvelope {
    pub before: Prediction,
    pub after: Prediction,
}

/// POST /events/predictions/:id/created
///
/// Fire-and-forget toward the producer: the response is 200 with the
/// settlement summary even when every delivery failed. Only an invariant
/// defect or a store failure yields a 500 (so the platform may redeliver).
pub async fn prediction_created(
    State(state): State<AppState>,
    Path(prediction_id): Path<String>,
    Json(prediction): Json<Prediction>,
) -> Result<Json<DispatchSummary>, AppError> {
    let summary = state
        .dispatcher
        .on_prediction_created(&prediction_id, &prediction)
        .await?;
    Ok(Json(summary))
}

/// POST /events/predictions/:id/updated
pub async fn prediction_updated(
    State(state): State<AppState>,
    Path(prediction_id): Path<String>,
    Json(envelope): Json<UpdateEnvelope>,
) -> Result<Json<DispatchSummary>, AppError> {
    let summary = state
        .dispatcher
        .on_prediction_updated(&prediction_id, &envelope.before, &envelope.after)
        .await?;
    Ok(Json(summary))
}
