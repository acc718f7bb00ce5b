//! Health check handler.

use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
    /// Service version
    pub version: &'static str,
    /// Uptime in seconds
    pub uptime_secs: u64,
    /// Name of the active delivery gateway
    pub gateway: String,
}

/// Health check handler.
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.uptime_secs(),
        gateway: state.gateway.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use coral_engine::{MemoryStore, RecordingGateway};

    #[tokio::test]
    async fn test_health_check() {
        let state = Arc::new(AppState::new(
            ApiConfig::default(),
            Arc::new(MemoryStore::new()),
            Arc::new(RecordingGateway::new()),
        ));
        let response = health_check(State(state)).await;

        assert_eq!(response.status, "ok");
        assert_eq!(response.gateway, "recording");
    }
}
