//! API server implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use coral_engine::{ChatGateway, SubscriptionStore};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::routes::create_router;
use crate::state::AppState;

/// API server.
pub struct ApiServer {
    /// Server configuration
    config: ApiConfig,
    /// Application state
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server over the given store and gateway.
    #[must_use]
    pub fn new(
        config: ApiConfig,
        store: Arc<dyn SubscriptionStore>,
        gateway: Arc<dyn ChatGateway>,
    ) -> Self {
        let state = Arc::new(AppState::new(config.clone(), store, gateway));
        Self { config, state }
    }

    /// Creates a new API server with pre-built state.
    #[must_use]
    pub fn with_state(config: ApiConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Runs the API server until the shutdown future completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or run.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ApiError> {
        let addr = self.config.bind_address();

        let app = create_router(self.state.clone()).layer(TraceLayer::new_for_http());

        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| ApiError::Internal(format!("Invalid bind address: {e}")))?;

        let listener = TcpListener::bind(socket_addr)
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to bind to {addr}: {e}")))?;

        info!("API server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ApiError::Internal(format!("Server error: {e}")))?;

        warn!("API server shutting down");

        Ok(())
    }

    /// Runs the API server until the process is stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or run.
    pub async fn run(self) -> Result<(), ApiError> {
        self.run_with_shutdown(std::future::pending()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coral_engine::{MemoryStore, RecordingGateway};

    fn build_server() -> ApiServer {
        ApiServer::new(
            ApiConfig::default(),
            Arc::new(MemoryStore::new()),
            Arc::new(RecordingGateway::new()),
        )
    }

    #[test]
    fn test_api_server_new() {
        let server = build_server();
        assert_eq!(server.state().config.port, 3000);
    }

    #[test]
    fn test_api_server_with_state() {
        let server = build_server();
        let state = server.state().clone();
        let rebuilt = ApiServer::with_state(ApiConfig::default(), state.clone());

        assert!(Arc::ptr_eq(rebuilt.state(), &state));
    }
}
