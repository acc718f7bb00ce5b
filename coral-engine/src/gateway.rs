//! Chat delivery gateway.
//!
//! The gateway is the seam between the engine and the chat platform. It
//! exposes exactly the two primitives fan-out needs: send a message to a
//! channel, and open a direct-message channel for a user (direct messages
//! are sent by opening the DM channel and then sending to it, and the two
//! steps fail independently).

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::{debug, info};

use coral_core::{ChannelId, UserId};

use crate::error::EngineError;

/// Chat delivery primitives.
///
/// Implementations are fire-and-forget from the engine's point of view: the
/// dispatcher logs failures and never retries.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Returns the gateway name, for logging.
    fn name(&self) -> &str;

    /// Sends a message to a channel.
    async fn send_channel_message(
        &self,
        channel_id: &ChannelId,
        message: &str,
    ) -> Result<(), EngineError>;

    /// Opens (or reuses) the direct-message channel for a user and returns
    /// its channel id.
    async fn open_direct_channel(&self, user_id: &UserId) -> Result<ChannelId, EngineError>;
}

/// A message recorded by [`RecordingGateway`].
#[derive(Debug, Clone)]
pub struct SentMessage {
    /// Channel the message was sent to.
    pub channel_id: ChannelId,
    /// Message body.
    pub message: String,
}

/// In-memory gateway that records every send.
///
/// Used by tests, and by the server when no chat credentials are configured
/// (messages are then only logged). Specific channels or users can be told
/// to fail, to exercise delivery-failure isolation.
#[derive(Default)]
pub struct RecordingGateway {
    sent: parking_lot::RwLock<Vec<SentMessage>>,
    failing_channels: parking_lot::RwLock<HashSet<ChannelId>>,
    failing_users: parking_lot::RwLock<HashSet<UserId>>,
}

impl RecordingGateway {
    /// Creates an empty recording gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every send to the given channel fail.
    pub fn fail_channel(&self, channel_id: impl Into<ChannelId>) {
        self.failing_channels.write().insert(channel_id.into());
    }

    /// Makes the direct-message channel open fail for the given user.
    pub fn fail_user(&self, user_id: impl Into<UserId>) {
        self.failing_users.write().insert(user_id.into());
    }

    /// Returns a copy of every recorded message, in send order.
    #[must_use]
    pub fn messages(&self) -> Vec<SentMessage> {
        self.sent.read().clone()
    }

    /// Returns the number of recorded messages.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.sent.read().len()
    }

    /// Returns the channel ids that received messages, in send order.
    #[must_use]
    pub fn delivered_channels(&self) -> Vec<ChannelId> {
        self.sent.read().iter().map(|m| m.channel_id.clone()).collect()
    }

    /// Clears all recorded messages.
    pub fn clear(&self) {
        self.sent.write().clear();
    }
}

#[async_trait]
impl ChatGateway for RecordingGateway {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send_channel_message(
        &self,
        channel_id: &ChannelId,
        message: &str,
    ) -> Result<(), EngineError> {
        if self.failing_channels.read().contains(channel_id) {
            return Err(EngineError::Delivery {
                channel: channel_id.to_string(),
                reason: "channel marked as failing".to_string(),
            });
        }

        self.sent.write().push(SentMessage {
            channel_id: channel_id.clone(),
            message: message.to_string(),
        });
        info!(channel = %channel_id, "Recorded channel message");
        Ok(())
    }

    async fn open_direct_channel(&self, user_id: &UserId) -> Result<ChannelId, EngineError> {
        if self.failing_users.read().contains(user_id) {
            return Err(EngineError::DirectChannel {
                user: user_id.clone(),
                reason: "user marked as failing".to_string(),
            });
        }
        Ok(ChannelId::new(format!("dm-{user_id}")))
    }
}

/// Direct-message channel handle returned by the chat platform.
#[derive(Debug, Deserialize)]
struct DirectChannel {
    id: ChannelId,
}

/// HTTP gateway speaking to the chat platform's REST API.
///
/// Protocol fidelity is out of scope: this is a thin pair of POSTs against
/// the platform's channel-message and DM-open endpoints, authenticated with
/// a bot token.
pub struct HttpGateway {
    base_url: String,
    bot_token: String,
    client: reqwest::Client,
}

impl HttpGateway {
    /// Creates an HTTP gateway against the given API base URL.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        bot_token: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        let base_url = base_url.into();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
            client,
        }
    }

    /// Returns the configured API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatGateway for HttpGateway {
    fn name(&self) -> &str {
        "http"
    }

    async fn send_channel_message(
        &self,
        channel_id: &ChannelId,
        message: &str,
    ) -> Result<(), EngineError> {
        let url = format!("{}/channels/{}/messages", self.base_url, channel_id);
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bot {}", self.bot_token))
            .json(&serde_json::json!({ "content": message }))
            .send()
            .await
            .map_err(|e| EngineError::Delivery {
                channel: channel_id.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(EngineError::Delivery {
                channel: channel_id.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        debug!(channel = %channel_id, "Channel message delivered");
        Ok(())
    }

    async fn open_direct_channel(&self, user_id: &UserId) -> Result<ChannelId, EngineError> {
        let url = format!("{}/users/@me/channels", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bot {}", self.bot_token))
            .json(&serde_json::json!({ "recipient_id": user_id }))
            .send()
            .await
            .map_err(|e| EngineError::DirectChannel {
                user: user_id.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(EngineError::DirectChannel {
                user: user_id.clone(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let channel: DirectChannel =
            response.json().await.map_err(|e| EngineError::DirectChannel {
                user: user_id.clone(),
                reason: e.to_string(),
            })?;
        Ok(channel.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_gateway_records_sends() {
        let gateway = RecordingGateway::new();
        gateway
            .send_channel_message(&ChannelId::new("ch-1"), "hello")
            .await
            .unwrap();

        let messages = gateway.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].channel_id.as_str(), "ch-1");
        assert_eq!(messages[0].message, "hello");
    }

    #[tokio::test]
    async fn test_recording_gateway_failing_channel() {
        let gateway = RecordingGateway::new();
        gateway.fail_channel("ch-bad");

        let result = gateway
            .send_channel_message(&ChannelId::new("ch-bad"), "hello")
            .await;
        assert!(matches!(result, Err(EngineError::Delivery { .. })));
        assert_eq!(gateway.message_count(), 0);
    }

    #[tokio::test]
    async fn test_recording_gateway_direct_channel() {
        let gateway = RecordingGateway::new();
        let dm = gateway.open_direct_channel(&UserId::new("u1")).await.unwrap();
        assert_eq!(dm.as_str(), "dm-u1");
    }

    #[tokio::test]
    async fn test_recording_gateway_failing_user() {
        let gateway = RecordingGateway::new();
        gateway.fail_user("u-bad");

        let result = gateway.open_direct_channel(&UserId::new("u-bad")).await;
        assert!(matches!(result, Err(EngineError::DirectChannel { .. })));
    }

    #[test]
    fn test_http_gateway_trims_trailing_slash() {
        let gateway = HttpGateway::new(
            "https://chat.example.com/api/",
            "token",
            Duration::from_secs(10),
        );
        assert_eq!(gateway.base_url(), "https://chat.example.com/api");
    }
}
