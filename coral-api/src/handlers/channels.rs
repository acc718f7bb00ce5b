//! Channel feed configuration handlers.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::Deserialize;

use coral_core::{ChannelConfig, ChannelId, FrequencyTier};

use crate::response::{ApiResponse, EmptyResponse};
use crate::state::AppState;

/// Request body for enabling/disabling a channel's market feed.
#[derive(Debug, Deserialize)]
pub struct FeedToggleRequest {
    /// Target channel.
    pub channel_id: ChannelId,
    /// Whether the feed should be enabled.
    pub enabled: bool,
}

/// Request body for replacing a channel's category allow-list.
#[derive(Debug, Deserialize)]
pub struct CategoriesRequest {
    /// Target channel.
    pub channel_id: ChannelId,
    /// New allow-list; empty clears the restriction.
    #[serde(default)]
    pub allowed_categories: HashSet<String>,
}

/// Request body for changing a channel's update frequency.
#[derive(Debug, Deserialize)]
pub struct FrequencyRequest {
    /// Target channel.
    pub channel_id: ChannelId,
    /// New tier name; unrecognized values fall back to medium.
    pub frequency: String,
}

/// Returns a channel's feed configuration.
///
/// GET /channels/{channel_id}/settings
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    Path(channel_id): Path<ChannelId>,
) -> ApiResponse<ChannelConfig> {
    ApiResponse::success(state.store.channel_config(&channel_id).await)
}

/// Enables or disables the market feed for a channel.
///
/// POST /channels/feed
pub async fn set_feed(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FeedToggleRequest>,
) -> EmptyResponse {
    let mut config = state.store.channel_config(&request.channel_id).await;
    config.feed_enabled = request.enabled;
    save_touched(&state, config).await;
    EmptyResponse::success()
}

/// Replaces the category allow-list for a channel.
///
/// POST /channels/categories
pub async fn set_categories(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CategoriesRequest>,
) -> EmptyResponse {
    let mut config = state.store.channel_config(&request.channel_id).await;
    config.allowed_categories = request.allowed_categories;
    save_touched(&state, config).await;
    EmptyResponse::success()
}

/// Changes the update frequency tier for a channel.
///
/// POST /channels/frequency
pub async fn set_frequency(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FrequencyRequest>,
) -> EmptyResponse {
    let mut config = state.store.channel_config(&request.channel_id).await;
    config.frequency = FrequencyTier::parse(&request.frequency);
    save_touched(&state, config).await;
    EmptyResponse::success()
}

/// Saves a config with a fresh `last_update` stamp. Admin changes also
/// reset the update clock.
async fn save_touched(state: &AppState, mut config: ChannelConfig) {
    config.last_update = Some(Utc::now());
    state.store.save_channel_config(config).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use coral_engine::{MemoryStore, RecordingGateway, SubscriptionStore};

    fn test_state() -> (Arc<AppState>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = Arc::new(AppState::new(
            ApiConfig::default(),
            store.clone(),
            Arc::new(RecordingGateway::new()),
        ));
        (state, store)
    }

    #[tokio::test]
    async fn test_get_settings_defaults_for_unknown_channel() {
        let (state, _store) = test_state();
        let response = get_settings(State(state), Path(ChannelId::new("ch-1"))).await;
        let config = response.data.unwrap();

        assert!(config.feed_enabled);
        assert_eq!(config.frequency, FrequencyTier::Medium);
    }

    #[tokio::test]
    async fn test_set_feed_persists_and_stamps() {
        let (state, store) = test_state();
        set_feed(
            State(state),
            Json(FeedToggleRequest {
                channel_id: ChannelId::new("ch-1"),
                enabled: false,
            }),
        )
        .await;

        let config = store.channel_config(&ChannelId::new("ch-1")).await;
        assert!(!config.feed_enabled);
        assert!(config.last_update.is_some());
    }

    #[tokio::test]
    async fn test_set_categories_replaces_list() {
        let (state, store) = test_state();
        set_categories(
            State(state.clone()),
            Json(CategoriesRequest {
                channel_id: ChannelId::new("ch-1"),
                allowed_categories: ["politics".to_string()].into_iter().collect(),
            }),
        )
        .await;
        set_categories(
            State(state),
            Json(CategoriesRequest {
                channel_id: ChannelId::new("ch-1"),
                allowed_categories: HashSet::new(),
            }),
        )
        .await;

        let config = store.channel_config(&ChannelId::new("ch-1")).await;
        assert!(config.allowed_categories.is_empty());
    }

    #[tokio::test]
    async fn test_set_frequency_parses_tier() {
        let (state, store) = test_state();
        set_frequency(
            State(state.clone()),
            Json(FrequencyRequest {
                channel_id: ChannelId::new("ch-1"),
                frequency: "high".to_string(),
            }),
        )
        .await;
        assert_eq!(
            store.channel_config(&ChannelId::new("ch-1")).await.frequency,
            FrequencyTier::High
        );

        // Unknown tiers degrade to medium.
        set_frequency(
            State(state),
            Json(FrequencyRequest {
                channel_id: ChannelId::new("ch-1"),
                frequency: "sometimes".to_string(),
            }),
        )
        .await;
        assert_eq!(
            store.channel_config(&ChannelId::new("ch-1")).await.frequency,
            FrequencyTier::Medium
        );
    }
}
