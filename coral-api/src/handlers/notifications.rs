//! Direct notification handler.
//!
//! Lets the backend push a one-off rendered notification to a single user,
//! outside the subscription fan-out.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use coral_core::{BuyDetails, EventKind, Market, MarketEvent, MarketId, UserId};
use coral_engine::render;

use crate::error::{ApiError, ApiResult};
use crate::response::AcceptedResponse;
use crate::state::AppState;

/// Request body for a direct notification.
#[derive(Debug, Deserialize)]
pub struct DirectMessageRequest {
    /// Target user.
    pub user_id: UserId,
    /// Which message kind to render.
    pub kind: EventKind,
    /// Partial market data for the message.
    pub payload: DirectMessagePayload,
}

/// Partial market data accepted on direct notifications. Only the fields
/// the requested message kind renders need to be present.
#[derive(Debug, Deserialize)]
pub struct DirectMessagePayload {
    /// Market identifier.
    pub market_id: MarketId,
    /// Market title.
    pub title: String,
    /// Market description.
    #[serde(default)]
    pub description: String,
    /// Current volume.
    #[serde(default)]
    pub volume: f64,
    /// Trading end time.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Winning outcome, for resolution messages.
    #[serde(default)]
    pub winning_outcome: Option<String>,
    /// Amount spent, for buy messages.
    #[serde(default)]
    pub amount: f64,
    /// Outcome bought, for buy messages.
    #[serde(default)]
    pub outcome: String,
    /// Buyer name, for buy messages.
    #[serde(default)]
    pub buyer: Option<String>,
    /// Market page link.
    #[serde(default)]
    pub link: String,
}

impl DirectMessagePayload {
    fn into_event(self, kind: EventKind) -> MarketEvent {
        let mut market = Market::new(self.market_id, self.title);
        market.description = self.description;
        market.volume = self.volume;
        market.end_time = self.end_time;
        market.resolved_outcome = self.winning_outcome.filter(|o| !o.is_empty());
        market.link = self.link;

        match kind {
            EventKind::MarketCreated => MarketEvent::created(market),
            EventKind::MarketUpdated => MarketEvent::updated(market),
            EventKind::TradingStarted => MarketEvent::trading_started(market),
            EventKind::TradingEnded => MarketEvent::trading_ended(market),
            EventKind::MarketResolved => MarketEvent::resolved(market),
            EventKind::MarketBuy => MarketEvent::buy(
                market,
                BuyDetails {
                    amount: self.amount,
                    outcome: self.outcome,
                    buyer: self.buyer,
                },
            ),
        }
    }
}

/// Direct notification acknowledgement.
#[derive(Debug, Serialize)]
pub struct DirectMessageAck {
    /// The user the message was delivered to.
    pub user_id: UserId,
}

/// Renders a message of the requested kind and delivers it as a DM.
///
/// POST /notifications/dm
pub async fn send_direct_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DirectMessageRequest>,
) -> ApiResult<AcceptedResponse<DirectMessageAck>> {
    let event = request.payload.into_event(request.kind);
    let message = render::render(&event, Utc::now());

    let dm_channel = state
        .gateway
        .open_direct_channel(&request.user_id)
        .await
        .map_err(|e| {
            warn!(user = %request.user_id, error = %e, "Failed to open DM channel");
            ApiError::Internal("Failed to open direct-message channel".to_string())
        })?;

    state
        .gateway
        .send_channel_message(&dm_channel, &message)
        .await
        .map_err(|e| {
            warn!(user = %request.user_id, error = %e, "Direct message delivery failed");
            ApiError::Internal("Failed to deliver direct message".to_string())
        })?;

    Ok(AcceptedResponse::new(DirectMessageAck {
        user_id: request.user_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use coral_engine::{MemoryStore, RecordingGateway};

    fn test_state() -> (Arc<AppState>, Arc<RecordingGateway>) {
        let gateway = Arc::new(RecordingGateway::new());
        let state = Arc::new(AppState::new(
            ApiConfig::default(),
            Arc::new(MemoryStore::new()),
            gateway.clone(),
        ));
        (state, gateway)
    }

    fn resolution_request() -> DirectMessageRequest {
        DirectMessageRequest {
            user_id: UserId::new("u1"),
            kind: EventKind::MarketResolved,
            payload: DirectMessagePayload {
                market_id: MarketId::new("m1"),
                title: "T".to_string(),
                description: String::new(),
                volume: 0.0,
                end_time: None,
                winning_outcome: Some("Yes".to_string()),
                amount: 0.0,
                outcome: String::new(),
                buyer: None,
                link: String::new(),
            },
        }
    }

    #[tokio::test]
    async fn test_direct_message_delivers_to_dm_channel() {
        let (state, gateway) = test_state();

        let response = send_direct_message(State(state), Json(resolution_request()))
            .await
            .unwrap();
        assert_eq!(response.data.user_id.as_str(), "u1");

        let messages = gateway.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].channel_id.as_str(), "dm-u1");
        assert!(messages[0].message.contains("Resolved: **Yes**"));
    }

    #[tokio::test]
    async fn test_direct_message_failed_open_is_internal_error() {
        let (state, gateway) = test_state();
        gateway.fail_user("u1");

        let result = send_direct_message(State(state), Json(resolution_request())).await;
        assert!(matches!(result, Err(ApiError::Internal(_))));
        assert_eq!(gateway.message_count(), 0);
    }
}
