//! API route definitions.

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::handlers::{channels, events, health, notifications, subscriptions, webhooks};
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

/// Creates the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new().route("/health", get(health::health_check));

    // Everything else sits behind the shared-secret check
    let protected_routes = Router::new()
        // Event ingress
        .route("/events/market-created", post(events::market_created))
        .route("/events/market-updated", post(events::market_updated))
        .route("/events/trading-started", post(events::trading_started))
        .route("/events/trading-ended", post(events::trading_ended))
        .route("/events/market-resolved", post(events::market_resolved))
        .route("/events/market-buy", post(events::market_buy))
        // Subscription routes
        .route("/subscriptions/markets", post(subscriptions::subscribe_market))
        .route("/subscriptions/markets", delete(subscriptions::unsubscribe_market))
        .route("/subscriptions/creators", post(subscriptions::subscribe_creator))
        .route("/subscriptions/creators", delete(subscriptions::unsubscribe_creator))
        .route("/subscriptions/{user_id}", get(subscriptions::get_subscriptions))
        // Channel feed routes
        .route("/channels/{channel_id}/settings", get(channels::get_settings))
        .route("/channels/{channel_id}/webhooks", get(webhooks::list_for_channel))
        .route("/channels/feed", post(channels::set_feed))
        .route("/channels/categories", post(channels::set_categories))
        .route("/channels/frequency", post(channels::set_frequency))
        // Webhook registration routes
        .route("/webhooks", post(webhooks::register))
        .route("/webhooks", get(webhooks::list))
        .route("/webhooks/{id}", get(webhooks::get_registration))
        .route("/webhooks/{id}", delete(webhooks::unregister))
        // Direct notifications
        .route("/notifications/dm", post(notifications::send_direct_message))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/v1", public_routes.merge(protected_routes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use coral_engine::{MemoryStore, RecordingGateway};

    #[test]
    fn test_create_router() {
        let state = Arc::new(AppState::new(
            ApiConfig::default(),
            Arc::new(MemoryStore::new()),
            Arc::new(RecordingGateway::new()),
        ));
        let _router = create_router(state);
        // Router creation should not panic
    }
}
