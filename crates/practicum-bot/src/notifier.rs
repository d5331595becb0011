//! Outbound Telegram delivery.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use thiserror::Error;
use tracing::debug;

use crate::config::Settings;

/// Upper bound on one Telegram API call. A hung call must not stall the
/// polling loop for longer than a cycle.
const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors surfaced by the chat transport.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build the Telegram client: {0}")]
    Client(String),

    /// The message could not be delivered.
    #[error("message delivery failed: {0}")]
    Delivery(String),
}

impl From<teloxide::RequestError> for NotifyError {
    fn from(e: teloxide::RequestError) -> Self {
        Self::Delivery(e.to_string())
    }
}

/// Capability to push one text message to the configured chat.
///
/// The watcher is generic over this so delivery can be observed in tests
/// without a live bot token.
#[async_trait]
pub trait Notify: Send + Sync {
    /// Delivers `text`, resolving only once the transport accepted it.
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

#[async_trait]
impl<T: Notify + ?Sized> Notify for Arc<T> {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        (**self).send(text).await
    }
}

/// Telegram-backed notifier bound to a single chat.
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    /// Builds a notifier from the bot token and chat id in `settings`.
    ///
    /// The HTTP client starts from teloxide's default reqwest settings,
    /// which keeps the client type aligned with the one `Bot::with_client`
    /// accepts, and tightens the request timeout to the delivery bound.
    pub fn new(settings: &Settings) -> Result<Self, NotifyError> {
        let http = teloxide::net::default_reqwest_settings()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::Client(e.to_string()))?;

        Ok(Self {
            bot: Bot::with_client(settings.telegram_token.clone(), http),
            chat_id: ChatId(settings.telegram_chat_id),
        })
    }
}

#[async_trait]
impl Notify for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        self.bot.send_message(self.chat_id, text).await?;
        debug!(chat_id = self.chat_id.0, "message delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            practicum_token: "practicum-token".to_string(),
            practicum_api_url: "https://practicum.example/api/".to_string(),
            telegram_token: "4242:practicum-watch".to_string(),
            telegram_chat_id: -1_001_234_567_890,
        }
    }

    #[tokio::test]
    async fn test_notifier_binds_the_configured_chat() {
        let notifier = TelegramNotifier::new(&settings()).unwrap();
        assert_eq!(notifier.chat_id, ChatId(-1_001_234_567_890));
    }
}
