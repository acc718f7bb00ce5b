//! Subscription management handlers.
//!
//! These delegate straight to the subscription store; there is no policy
//! here. Subscribing twice and unsubscribing something never subscribed are
//! both silent no-ops, because subscriber interests are sets.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use coral_core::{MarketId, UserId};

use crate::response::{ApiResponse, EmptyResponse};
use crate::state::AppState;

/// Request body for market subscribe/unsubscribe.
#[derive(Debug, Deserialize)]
pub struct MarketSubscriptionRequest {
    /// Subscribing user.
    pub user_id: UserId,
    /// Target market.
    pub market_id: MarketId,
}

/// Request body for creator subscribe/unsubscribe.
#[derive(Debug, Deserialize)]
pub struct CreatorSubscriptionRequest {
    /// Subscribing user.
    pub user_id: UserId,
    /// Target creator name.
    pub creator: String,
}

/// A user's subscriptions, as returned by the API.
#[derive(Debug, Serialize)]
pub struct SubscriptionsResponse {
    /// Subscribed market ids, sorted for stable output.
    pub markets: Vec<MarketId>,
    /// Subscribed creator names, sorted for stable output.
    pub creators: Vec<String>,
}

/// Subscribes a user to a market.
///
/// POST /subscriptions/markets
pub async fn subscribe_market(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MarketSubscriptionRequest>,
) -> EmptyResponse {
    let mut subscriber = state.store.subscriber(&request.user_id).await;
    subscriber.subscribe_market(request.market_id);
    state.store.save_subscriber(subscriber).await;
    EmptyResponse::success()
}

/// Unsubscribes a user from a market.
///
/// DELETE /subscriptions/markets
pub async fn unsubscribe_market(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MarketSubscriptionRequest>,
) -> EmptyResponse {
    let mut subscriber = state.store.subscriber(&request.user_id).await;
    subscriber.unsubscribe_market(&request.market_id);
    state.store.save_subscriber(subscriber).await;
    EmptyResponse::success()
}

/// Subscribes a user to a creator.
///
/// POST /subscriptions/creators
pub async fn subscribe_creator(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatorSubscriptionRequest>,
) -> EmptyResponse {
    let mut subscriber = state.store.subscriber(&request.user_id).await;
    subscriber.subscribe_creator(request.creator);
    state.store.save_subscriber(subscriber).await;
    EmptyResponse::success()
}

/// Unsubscribes a user from a creator.
///
/// DELETE /subscriptions/creators
pub async fn unsubscribe_creator(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatorSubscriptionRequest>,
) -> EmptyResponse {
    let mut subscriber = state.store.subscriber(&request.user_id).await;
    subscriber.unsubscribe_creator(&request.creator);
    state.store.save_subscriber(subscriber).await;
    EmptyResponse::success()
}

/// Returns a user's subscriptions.
///
/// GET /subscriptions/{user_id}
pub async fn get_subscriptions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<UserId>,
) -> ApiResponse<SubscriptionsResponse> {
    let subscriber = state.store.subscriber(&user_id).await;

    let mut markets: Vec<MarketId> = subscriber.markets.into_iter().collect();
    markets.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    let mut creators: Vec<String> = subscriber.creators.into_iter().collect();
    creators.sort();

    ApiResponse::success(SubscriptionsResponse { markets, creators })
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
    async fn test_subscribe_market_twice_is_idempotent() {
        let (state, store) = test_state();

        for _ in 0..2 {
            let request = MarketSubscriptionRequest {
                user_id: UserId::new("u1"),
                market_id: MarketId::new("m1"),
            };
            subscribe_market(State(state.clone()), Json(request)).await;
        }

        let subscriber = store.subscriber(&UserId::new("u1")).await;
        assert_eq!(subscriber.markets.len(), 1);
    }

    #[tokio::test]
    async fn test_unsubscribe_nonmember_is_noop() {
        let (state, store) = test_state();

        subscribe_market(
            State(state.clone()),
            Json(MarketSubscriptionRequest {
                user_id: UserId::new("u1"),
                market_id: MarketId::new("m1"),
            }),
        )
        .await;
        unsubscribe_market(
            State(state.clone()),
            Json(MarketSubscriptionRequest {
                user_id: UserId::new("u1"),
                market_id: MarketId::new("m2"),
            }),
        )
        .await;

        let subscriber = store.subscriber(&UserId::new("u1")).await;
        assert!(subscriber.markets.contains(&MarketId::new("m1")));
        assert_eq!(subscriber.markets.len(), 1);
    }

    #[tokio::test]
    async fn test_creator_subscription_roundtrip() {
        let (state, store) = test_state();

        subscribe_creator(
            State(state.clone()),
            Json(CreatorSubscriptionRequest {
                user_id: UserId::new("u1"),
                creator: "alice".to_string(),
            }),
        )
        .await;
        unsubscribe_creator(
            State(state.clone()),
            Json(CreatorSubscriptionRequest {
                user_id: UserId::new("u1"),
                creator: "alice".to_string(),
            }),
        )
        .await;

        let subscriber = store.subscriber(&UserId::new("u1")).await;
        assert!(subscriber.is_empty());
    }

    #[tokio::test]
    async fn test_get_subscriptions_sorted() {
        let (state, _store) = test_state();

        for market in ["m3", "m1", "m2"] {
            subscribe_market(
                State(state.clone()),
                Json(MarketSubscriptionRequest {
                    user_id: UserId::new("u1"),
                    market_id: MarketId::new(market),
                }),
            )
            .await;
        }

        let response = get_subscriptions(State(state), Path(UserId::new("u1"))).await;
        let data = response.data.unwrap();
        assert_eq!(
            data.markets,
            vec![MarketId::new("m1"), MarketId::new("m2"), MarketId::new("m3")]
        );
    }

    #[tokio::test]
    async fn test_get_subscriptions_unknown_user_is_empty() {
        let (state, _store) = test_state();
        let response = get_subscriptions(State(state), Path(UserId::new("ghost"))).await;
        let data = response.data.unwrap();
        assert!(data.markets.is_empty());
        assert!(data.creators.is_empty());
    }
}
