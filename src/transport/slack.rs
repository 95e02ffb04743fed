// Slack transport - chat.postMessage with a bot OAuth token

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub const SLACK_API_BASE_URL: &str = "https://slack.com";
pub const CHAT_POST_MESSAGE_API: &str = "/api/chat.postMessage";
pub const AUTH_TEST_API: &str = "/api/auth.test";

/// A fully rendered chat message, decoded from a notification template.
///
/// `channel` and `text` are required; any extra keys the template emits
/// (blocks, attachments, icon_emoji, ...) are passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub channel: String,
    pub text: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Outbound chat delivery.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Post one rendered chat message
    async fn post_message(&self, message: &ChatMessage) -> Result<()>;

    /// Test transport connectivity (optional)
    async fn test(&self) -> Result<()> {
        Ok(())
    }
}

/// Posts chat messages to a Slack channel or user.
///
/// See https://api.slack.com/methods/chat.postMessage
pub struct SlackChatPoster {
    oauth_token: String,
    base_url: String,
    client: reqwest::Client,
}

impl SlackChatPoster {
    pub fn new(oauth_token: String) -> Self {
        Self::with_base_url(oauth_token, SLACK_API_BASE_URL.to_string())
    }

    /// Create a poster against a non-default API base URL (used in tests)
    pub fn with_base_url(oauth_token: String, base_url: String) -> Self {
        Self {
            oauth_token,
            base_url,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    async fn post(&self, api: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, api))
            .bearer_auth(&self.oauth_token)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Slack API returned status {}: {}",
                status,
                body
            ));
        }

        // Slack reports most failures in the envelope, not the HTTP status
        let envelope: serde_json::Value = response.json().await?;
        if envelope["ok"] != serde_json::Value::Bool(true) {
            let reason = envelope["error"].as_str().unwrap_or("unknown error");
            return Err(anyhow::anyhow!("Slack API call failed: {}", reason));
        }

        Ok(envelope)
    }
}

#[async_trait]
impl ChatTransport for SlackChatPoster {
    async fn post_message(&self, message: &ChatMessage) -> Result<()> {
        let body = serde_json::to_value(message)?;
        self.post(CHAT_POST_MESSAGE_API, &body).await?;
        Ok(())
    }

    async fn test(&self) -> Result<()> {
        self.post(AUTH_TEST_API, &serde_json::json!({})).await?;
        Ok(())
    }
}
