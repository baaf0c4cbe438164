use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Transport-level failure from an external collaborator client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {status} {detail}")]
    Status {
        status: reqwest::StatusCode,
        detail: String,
    },
}

/// Per-subscription execution failure. `Transport` and `DataIntegrity` are
/// expected/recoverable: the dispatcher logs them and the subscription is
/// skipped without touching siblings. `Invariant` marks a programming defect
/// and is escalated to a fatal event error once all siblings have settled.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error("transport failure: {0}")]
    Transport(#[from] ClientError),

    #[error("data integrity: {0}")]
    DataIntegrity(String),

    #[error("no executor registered for action kind {0}")]
    UnregisteredKind(crate::models::ActionKind),

    #[error("invariant violation: {0}")]
    Invariant(String),
}

impl ExecuteError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExecuteError::Invariant(_))
    }
}

/// HTTP-surface error for the ingestion endpoints.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(e.into())
    }
}
