use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{ChatWebhookClient, Embed, MentionPolicy};
use crate::errors::ClientError;

const DISCORD_API_BASE: &str = "https://discord.com/api";

#[derive(Debug, Deserialize)]
struct PostedMessage {
    id: String,
}

/// Discord webhook transport. `wait=true` makes the create call return the
/// posted message so its id can be persisted for the later edit.
#[derive(Debug, Clone)]
pub struct DiscordWebhookClient {
    http: Client,
    base_url: String,
}

impl Default for DiscordWebhookClient {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl DiscordWebhookClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: DISCORD_API_BASE.into(),
        }
    }

    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let detail = resp.text().await.unwrap_or_default();
        Err(ClientError::Status { status, detail })
    }
}

#[async_trait]
impl ChatWebhookClient for DiscordWebhookClient {
    async fn post(
        &self,
        target_id: &str,
        token: &str,
        content: &str,
        mentions: &MentionPolicy,
    ) -> Result<String, ClientError> {
        let url = format!("{}/webhooks/{}/{}", self.base_url, target_id, token);
        let body = json!({
            "content": content,
            "allowed_mentions": mentions,
        });

        let resp = self
            .http
            .post(&url)
            .query(&[("wait", "true")])
            .json(&body)
            .send()
            .await?;
        let message: PostedMessage = Self::check(resp).await?.json().await?;
        Ok(message.id)
    }

    async fn patch(
        &self,
        target_id: &str,
        token: &str,
        message_id: &str,
        embed: &Embed,
    ) -> Result<(), ClientError> {
        let url = format!(
            "{}/webhooks/{}/{}/messages/{}",
            self.base_url, target_id, token, message_id
        );
        let body = json!({ "embeds": [embed] });

        let resp = self.http.patch(&url).json(&body).send().await?;
        Self::check(resp).await?;
        Ok(())
    }
}
