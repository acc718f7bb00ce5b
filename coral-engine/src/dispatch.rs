//! Fan-out dispatcher.
//!
//! Given a rendered message and the event it came from, the dispatcher
//! performs two independent passes: one over every channel configuration
//! and one over every subscriber. Each delivery attempt is isolated (a
//! failure is logged and counted, never propagated), so one unreachable
//! target cannot starve the rest of the fan-out.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use coral_core::MarketEvent;

use crate::gateway::ChatGateway;
use crate::policy;
use crate::store::SubscriptionStore;

/// Counters describing one fan-out pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Channels the message was delivered to.
    pub channels_delivered: usize,
    /// Channels skipped by policy (feed disabled, category, cadence).
    pub channels_skipped: usize,
    /// Channels where delivery failed.
    pub channels_failed: usize,
    /// Users the message was delivered to.
    pub users_delivered: usize,
    /// Subscribers whose interests did not match.
    pub users_skipped: usize,
    /// Users where DM open or delivery failed.
    pub users_failed: usize,
}

/// Fans rendered messages out to channels and subscribers.
pub struct Dispatcher {
    store: Arc<dyn SubscriptionStore>,
    gateway: Arc<dyn ChatGateway>,
}

impl Dispatcher {
    /// Creates a dispatcher over the given store and gateway.
    #[must_use]
    pub fn new(store: Arc<dyn SubscriptionStore>, gateway: Arc<dyn ChatGateway>) -> Self {
        Self { store, gateway }
    }

    /// Dispatches a rendered message to every eligible channel and user.
    ///
    /// Deliveries run sequentially; they are independent, so this loop is
    /// safe to parallelize later. Webhook registrations are not consulted;
    /// the channel pass iterates channel configurations directly.
    pub async fn dispatch(&self, event: &MarketEvent, message: &str) -> DispatchSummary {
        let mut summary = DispatchSummary::default();
        self.channel_pass(event, message, &mut summary).await;
        self.user_pass(event, message, &mut summary).await;

        info!(
            event = %event.kind(),
            market = %event.market().id,
            channels_delivered = summary.channels_delivered,
            users_delivered = summary.users_delivered,
            failed = summary.channels_failed + summary.users_failed,
            "Fan-out complete"
        );
        summary
    }

    async fn channel_pass(&self, event: &MarketEvent, message: &str, summary: &mut DispatchSummary) {
        let market = event.market();
        let now = Utc::now();
        // Snapshot taken before any await; nothing holds a store lock while
        // a delivery is in flight.
        let configs = self.store.channel_configs().await;

        for mut config in configs {
            if !config.feed_enabled {
                summary.channels_skipped += 1;
                continue;
            }
            if !config.allows_category(&market.category) {
                summary.channels_skipped += 1;
                continue;
            }
            if event.kind().is_cadence_gated()
                && !policy::should_send_update(market, config.frequency, config.last_update, now)
            {
                summary.channels_skipped += 1;
                continue;
            }

            match self
                .gateway
                .send_channel_message(&config.channel_id, message)
                .await
            {
                Ok(()) => {
                    summary.channels_delivered += 1;
                    debug!(channel = %config.channel_id, "Message sent to channel");
                    if event.kind().is_cadence_gated() {
                        config.last_update = Some(now);
                        self.store.save_channel_config(config).await;
                    }
                }
                Err(e) => {
                    summary.channels_failed += 1;
                    warn!(channel = %config.channel_id, error = %e, "Channel delivery failed");
                }
            }
        }
    }

    async fn user_pass(&self, event: &MarketEvent, message: &str, summary: &mut DispatchSummary) {
        let market = event.market();
        let subscribers = self.store.subscribers().await;

        for subscriber in subscribers {
            if !policy::should_notify_user(&subscriber, market) {
                summary.users_skipped += 1;
                continue;
            }

            let dm_channel = match self.gateway.open_direct_channel(&subscriber.user_id).await {
                Ok(channel) => channel,
                Err(e) => {
                    summary.users_failed += 1;
                    warn!(user = %subscriber.user_id, error = %e, "Failed to open DM channel");
                    continue;
                }
            };

            match self.gateway.send_channel_message(&dm_channel, message).await {
                Ok(()) => {
                    summary.users_delivered += 1;
                    debug!(user = %subscriber.user_id, "Direct message sent");
                }
                Err(e) => {
                    summary.users_failed += 1;
                    warn!(user = %subscriber.user_id, error = %e, "Direct message delivery failed");
                }
            }
        }
    }
}
