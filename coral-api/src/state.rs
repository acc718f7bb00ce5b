//! Application state for the API server.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use coral_engine::{ChatGateway, Dispatcher, SubscriptionStore};

use crate::config::ApiConfig;

/// Shared application state.
///
/// Holds handles to the store, gateway, and dispatcher; constructed once at
/// startup and passed to every handler. There is no ambient state anywhere.
pub struct AppState {
    /// API configuration
    pub config: ApiConfig,
    /// Subscription store
    pub store: Arc<dyn SubscriptionStore>,
    /// Chat delivery gateway
    pub gateway: Arc<dyn ChatGateway>,
    /// Fan-out dispatcher
    pub dispatcher: Arc<Dispatcher>,
    /// Server start time, for the health endpoint.
    started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates application state over the given store and gateway.
    #[must_use]
    pub fn new(
        config: ApiConfig,
        store: Arc<dyn SubscriptionStore>,
        gateway: Arc<dyn ChatGateway>,
    ) -> Self {
        let dispatcher = Arc::new(Dispatcher::new(store.clone(), gateway.clone()));
        Self {
            config,
            store,
            gateway,
            dispatcher,
            started_at: Utc::now(),
        }
    }

    /// Returns the number of seconds the server has been up.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        u64::try_from((Utc::now() - self.started_at).num_seconds()).unwrap_or(0)
    }
}
