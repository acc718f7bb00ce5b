//! Market event handlers.
//!
//! Each handler decodes its event-kind payload, renders the message, and
//! hands it to the dispatcher. Delivery failures never surface here (the
//! dispatcher logs and counts them), so these endpoints answer 202 with the
//! fan-out counters once the pass completes.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use coral_core::MarketEvent;
use coral_engine::{DispatchSummary, render};

use crate::ingress::{
    MarketBuyPayload, MarketCreatedPayload, MarketResolvedPayload, MarketUpdatedPayload,
    TradingEndedPayload, TradingStartedPayload,
};
use crate::response::AcceptedResponse;
use crate::state::AppState;

/// Fan-out counters reported back to the event source.
#[derive(Debug, Serialize)]
pub struct DispatchStats {
    /// Channels the message was delivered to.
    pub channels_delivered: usize,
    /// Users the message was delivered to.
    pub users_delivered: usize,
    /// Failed delivery attempts across both passes.
    pub failed: usize,
}

impl From<DispatchSummary> for DispatchStats {
    fn from(summary: DispatchSummary) -> Self {
        Self {
            channels_delivered: summary.channels_delivered,
            users_delivered: summary.users_delivered,
            failed: summary.channels_failed + summary.users_failed,
        }
    }
}

async fn dispatch_event(state: &AppState, event: MarketEvent) -> AcceptedResponse<DispatchStats> {
    let message = render::render(&event, Utc::now());
    let summary = state.dispatcher.dispatch(&event, &message).await;
    AcceptedResponse::new(DispatchStats::from(summary))
}

/// Handles a new-market event.
///
/// POST /events/market-created
pub async fn market_created(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MarketCreatedPayload>,
) -> AcceptedResponse<DispatchStats> {
    dispatch_event(&state, payload.into_event()).await
}

/// Handles a periodic market-update event.
///
/// POST /events/market-updated
pub async fn market_updated(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MarketUpdatedPayload>,
) -> AcceptedResponse<DispatchStats> {
    dispatch_event(&state, payload.into_event()).await
}

/// Handles a trading-started event.
///
/// POST /events/trading-started
pub async fn trading_started(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TradingStartedPayload>,
) -> AcceptedResponse<DispatchStats> {
    dispatch_event(&state, payload.into_event()).await
}

/// Handles a trading-ended event.
///
/// POST /events/trading-ended
pub async fn trading_ended(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TradingEndedPayload>,
) -> AcceptedResponse<DispatchStats> {
    dispatch_event(&state, payload.into_event()).await
}

/// Handles a market-resolved event.
///
/// POST /events/market-resolved
pub async fn market_resolved(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MarketResolvedPayload>,
) -> AcceptedResponse<DispatchStats> {
    dispatch_event(&state, payload.into_event()).await
}

/// Handles a market-buy event.
///
/// POST /events/market-buy
pub async fn market_buy(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MarketBuyPayload>,
) -> AcceptedResponse<DispatchStats> {
    dispatch_event(&state, payload.into_event()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use coral_core::{ChannelConfig, ChannelId, Subscriber};
    use coral_engine::{MemoryStore, RecordingGateway, SubscriptionStore};

    fn test_state() -> (Arc<AppState>, Arc<MemoryStore>, Arc<RecordingGateway>) {
        let store = Arc::new(MemoryStore::new());
        let gateway = Arc::new(RecordingGateway::new());
        let state = Arc::new(AppState::new(
            ApiConfig::default(),
            store.clone(),
            gateway.clone(),
        ));
        (state, store, gateway)
    }

    #[tokio::test]
    async fn test_market_created_fans_out() {
        let (state, store, gateway) = test_state();
        store
            .save_channel_config(ChannelConfig::new(ChannelId::new("ch-1")))
            .await;
        let mut sub = Subscriber::new("u1");
        sub.subscribe_market("m1");
        store.save_subscriber(sub).await;

        let payload: MarketCreatedPayload = serde_json::from_str(
            r#"{"market_id": "m1", "title": "T", "end_time": "2030-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let response = market_created(State(state), Json(payload)).await;

        assert_eq!(response.data.channels_delivered, 1);
        assert_eq!(response.data.users_delivered, 1);
        assert_eq!(response.data.failed, 0);
        assert_eq!(gateway.message_count(), 2);
        assert!(gateway.messages()[0].message.contains("NEW MARKET ALERT"));
    }

    #[tokio::test]
    async fn test_market_buy_renders_buy_message() {
        let (state, store, gateway) = test_state();
        store
            .save_channel_config(ChannelConfig::new(ChannelId::new("ch-1")))
            .await;

        let payload: MarketBuyPayload = serde_json::from_str(
            r#"{"market_id": "m1", "title": "T", "amount": 12.0, "outcome": "Yes"}"#,
        )
        .unwrap();
        let response = market_buy(State(state), Json(payload)).await;

        assert_eq!(response.data.channels_delivered, 1);
        let message = &gateway.messages()[0].message;
        assert!(message.contains("MARKET BUY"));
        assert!(message.contains("Buyer: Anonymous"));
    }
}
