//! Webhook registration handlers.
//!
//! Registrations are stored and listed here but are not consulted during
//! fan-out; the dispatcher iterates channel configurations directly.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::error;

use coral_core::{ChannelId, NewWebhookRegistration, WebhookRegistration};

use crate::error::{ApiError, ApiResult};
use crate::response::{ApiResponse, CreatedResponse, EmptyResponse};
use crate::state::AppState;

/// Registers a webhook for a channel.
///
/// POST /webhooks
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(registration): Json<NewWebhookRegistration>,
) -> ApiResult<CreatedResponse<WebhookRegistration>> {
    if registration.channel_id.as_str().is_empty() || registration.webhook_url.is_empty() {
        return Err(ApiError::BadRequest(
            "channel_id and webhook_url are required".to_string(),
        ));
    }

    match state.store.register_webhook(registration).await {
        Ok(stored) => Ok(CreatedResponse::new(stored)),
        Err(e) => {
            error!(error = %e, "Webhook registration failed");
            Err(ApiError::Internal("Failed to register webhook".to_string()))
        }
    }
}

/// Lists all webhook registrations.
///
/// GET /webhooks
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResponse<Vec<WebhookRegistration>> {
    ApiResponse::success(state.store.webhook_registrations().await)
}

/// Returns one webhook registration.
///
/// GET /webhooks/{id}
pub async fn get_registration(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<WebhookRegistration>> {
    state
        .store
        .webhook_registration(&id)
        .await
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::NotFound(format!("webhook registration {id}")))
}

/// Removes a webhook registration.
///
/// DELETE /webhooks/{id}
pub async fn unregister(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<EmptyResponse> {
    if state.store.unregister_webhook(&id).await {
        Ok(EmptyResponse::success())
    } else {
        Err(ApiError::NotFound(format!("webhook registration {id}")))
    }
}

/// Lists the webhook registrations for one channel.
///
/// GET /channels/{channel_id}/webhooks
pub async fn list_for_channel(
    State(state): State<Arc<AppState>>,
    Path(channel_id): Path<ChannelId>,
) -> ApiResponse<Vec<WebhookRegistration>> {
    ApiResponse::success(
        state
            .store
            .webhook_registrations_for_channel(&channel_id)
            .await,
    )
}
