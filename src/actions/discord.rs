use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::clients::{ChatWebhookClient, Embed, MentionPolicy};
use crate::dispatch::{ActionExecutor, ExecutionInput};
use crate::errors::ExecuteError;
use crate::models::{Action, ActionKind, DiscordWebhookAction, EmojiRef, Outcome};

/// Embed accent color for the resolution summary.
const EMBED_COLOR: u32 = 3_701_503;

/// Posts the prediction announcement on create and edits it with a result
/// summary when the prediction resolves.
pub struct DiscordExecutor {
    client: Arc<dyn ChatWebhookClient>,
}

impl DiscordExecutor {
    pub fn new(client: Arc<dyn ChatWebhookClient>) -> Self {
        Self { client }
    }
}

fn config(action: &Action) -> Result<&DiscordWebhookAction, ExecuteError> {
    match action {
        Action::DiscordWebhook(cfg) => Ok(cfg),
        other => Err(ExecuteError::Invariant(format!(
            "discord executor invoked with {} action",
            other.kind()
        ))),
    }
}

fn emoji_for<'a>(
    cfg: &'a DiscordWebhookAction,
    outcome: &Outcome,
) -> Result<&'a EmojiRef, ExecuteError> {
    usize::try_from(outcome.index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| cfg.outcome_emojis.get(i))
        .ok_or_else(|| {
            ExecuteError::DataIntegrity(format!(
                "no emoji configured for outcome index {} ({} configured)",
                outcome.index,
                cfg.outcome_emojis.len()
            ))
        })
}

fn render_announcement(
    cfg: &DiscordWebhookAction,
    input: &ExecutionInput<'_>,
) -> Result<String, ExecuteError> {
    let p = input.prediction;
    let mut content = format!(
        "Hey <@&{}>, *{}* Prediction! You have {} seconds.\n\n**{}**\n",
        cfg.role, p.game.name, p.prediction_window_seconds, p.title
    );
    for outcome in input.outcomes {
        let emoji = emoji_for(cfg, outcome)?;
        content.push_str(&format!(
            "<:{}:{}> ({}) {}\n",
            emoji.name, emoji.id, outcome.index, outcome.title
        ));
    }
    Ok(content)
}

/// Payout multiplier for the winning side. The 0.01 epsilon keeps the
/// division defined when the winning side received zero points; two decimals,
/// truncated toward zero.
pub fn winning_return(total_points: i64, winning_points: i64) -> Decimal {
    let epsilon = Decimal::new(1, 2);
    (Decimal::from(total_points) / (Decimal::from(winning_points) + epsilon))
        .round_dp_with_strategy(2, RoundingStrategy::ToZero)
}

#[async_trait]
impl ActionExecutor for DiscordExecutor {
    fn kind(&self) -> ActionKind {
        ActionKind::DiscordWebhook
    }

    async fn on_create(
        &self,
        action: &Action,
        input: &ExecutionInput<'_>,
    ) -> Result<Option<String>, ExecuteError> {
        let cfg = config(action)?;
        let content = render_announcement(cfg, input)?;
        let message_id = self
            .client
            .post(&cfg.id, &cfg.token, &content, &MentionPolicy::default())
            .await?;
        Ok(Some(message_id))
    }

    async fn on_update(
        &self,
        action: &Action,
        input: &ExecutionInput<'_>,
    ) -> Result<Option<String>, ExecuteError> {
        let cfg = config(action)?;
        let p = input.prediction;

        let message_id = input.correlation.ok_or_else(|| {
            ExecuteError::DataIntegrity(format!(
                "no message id recorded for prediction {}",
                input.prediction_id
            ))
        })?;

        let winning_id = p.winning_outcome_id.as_deref().ok_or_else(|| {
            ExecuteError::DataIntegrity(format!(
                "prediction {} has no winning outcome",
                input.prediction_id
            ))
        })?;
        let winner = input
            .outcomes
            .iter()
            .find(|o| o.id == winning_id)
            .ok_or_else(|| {
                ExecuteError::DataIntegrity(format!(
                    "unable to find winning_outcome_id={winning_id}"
                ))
            })?;

        let total_points: i64 = input.outcomes.iter().map(|o| o.total_points).sum();
        let ret = winning_return(total_points, winner.total_points);

        let emoji = emoji_for(cfg, winner)?;
        let embed = Embed {
            title: format!("<:{}:{}> {}", emoji.name, emoji.id, winner.title),
            description: format!(
                "{} users won {} points with a 1:{:.2} return",
                winner.total_users, total_points, ret
            ),
            color: EMBED_COLOR,
            timestamp: p.ended_at.map(|t| t.to_rfc3339()),
        };

        self.client
            .patch(&cfg.id, &cfg.token, message_id, &embed)
            .await?;
        Ok(None)
    }
}
