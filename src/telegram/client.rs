use async_trait::async_trait;
use serde_json::json;

use crate::services::watcher::MessageSink;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API client. Message delivery is fire-and-forget: failures
/// are logged as warnings and never block the polling flow.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    bot_token: String,
}

impl TelegramClient {
    pub fn new(http: reqwest::Client, bot_token: String) -> Self {
        Self {
            http,
            base_url: TELEGRAM_API_BASE.into(),
            bot_token,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.bot_token, method)
    }

    /// Send a text message to a chat. Failures are logged as warnings.
    pub async fn send_message(&self, chat_id: i64, text: &str) {
        let body = json!({
            "chat_id": chat_id,
            "text": text,
        });

        match self
            .http
            .post(self.method_url("sendMessage"))
            .json(&body)
            .send()
            .await
        {
            Ok(resp) if !resp.status().is_success() => {
                tracing::warn!(
                    status = %resp.status(),
                    chat_id,
                    "Telegram sendMessage returned non-2xx"
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, chat_id, "Failed to send Telegram message");
            }
        }
    }

    /// Register the webhook URL with Telegram. Called once at startup;
    /// unlike message delivery, a failure here is surfaced so the process
    /// fails fast on a bad configuration.
    pub async fn set_webhook(&self, url: &str) -> anyhow::Result<()> {
        let body = json!({ "url": url });
        let resp = self
            .http
            .post(self.method_url("setWebhook"))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            anyhow::bail!("setWebhook returned {}", resp.status());
        }
        Ok(())
    }
}

#[async_trait]
impl MessageSink for TelegramClient {
    async fn send(&self, chat_id: i64, text: &str) {
        self.send_message(chat_id, text).await;
    }
}
