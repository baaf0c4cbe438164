//! Outbound collaborator contracts: the chat-webhook transport and the
//! spreadsheet API. Kept behind traits so executors stay testable; the
//! reqwest implementations are thin wrappers over the wire formats.

pub mod discord;
pub mod sheets;

pub use discord::DiscordWebhookClient;
pub use sheets::SheetsApiClient;

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::ClientError;

/// Which mention classes the chat platform may resolve in a posted message.
#[derive(Debug, Clone, Serialize)]
pub struct MentionPolicy {
    pub parse: Vec<String>,
    pub users: Vec<String>,
}

impl Default for MentionPolicy {
    fn default() -> Self {
        Self {
            parse: vec!["users".into(), "roles".into()],
            users: Vec::new(),
        }
    }
}

/// Result-summary embed attached when editing the announcement message.
#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[async_trait]
pub trait ChatWebhookClient: Send + Sync {
    /// Post a message and return the platform-generated message id.
    async fn post(
        &self,
        target_id: &str,
        token: &str,
        content: &str,
        mentions: &MentionPolicy,
    ) -> Result<String, ClientError>;

    /// Edit a previously posted message in place.
    async fn patch(
        &self,
        target_id: &str,
        token: &str,
        message_id: &str,
        embed: &Embed,
    ) -> Result<(), ClientError>;
}

#[async_trait]
pub trait SpreadsheetClient: Send + Sync {
    async fn append_row(
        &self,
        sheet_id: &str,
        range: &str,
        row: &[String],
    ) -> Result<(), ClientError>;
}
