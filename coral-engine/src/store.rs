//! Subscription storage.
//!
//! The store owns the three entity collections (subscribers, channel
//! configurations, and webhook registrations) behind a capability trait so
//! a persistent implementation can replace [`MemoryStore`] later without
//! touching call sites. Each collection is guarded by its own reader/writer
//! lock; every method returns owned values, so no lock is ever held across
//! an `.await` in callers.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use ring::rand::{SecureRandom, SystemRandom};
use tracing::debug;

use coral_core::{
    ChannelConfig, ChannelId, NewWebhookRegistration, Subscriber, UserId, WebhookRegistration,
};

use crate::error::EngineError;

/// Length in bytes of the random suffix of a registration id.
const REGISTRATION_ID_BYTES: usize = 12;

/// Storage contract for subscribers, channel configurations, and webhook
/// registrations.
///
/// Subscriber and channel lookups never fail: unknown keys resolve to a
/// default-initialized record. Webhook lookups by id return `None` for
/// unknown ids. The only fallible operation is [`register_webhook`], whose
/// id generation depends on the system entropy source.
///
/// [`register_webhook`]: SubscriptionStore::register_webhook
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Returns the subscription record for a user, or an empty record if
    /// the user has never subscribed to anything.
    async fn subscriber(&self, user_id: &UserId) -> Subscriber;

    /// Upserts a subscription record by user id.
    async fn save_subscriber(&self, subscriber: Subscriber);

    /// Deletes a subscription record.
    async fn delete_subscriber(&self, user_id: &UserId);

    /// Returns a snapshot of all subscription records. No ordering is
    /// guaranteed.
    async fn subscribers(&self) -> Vec<Subscriber>;

    /// Returns the configuration for a channel, or the defaults if the
    /// channel has never been configured.
    async fn channel_config(&self, channel_id: &ChannelId) -> ChannelConfig;

    /// Upserts a channel configuration by channel id.
    async fn save_channel_config(&self, config: ChannelConfig);

    /// Returns a snapshot of all channel configurations.
    async fn channel_configs(&self) -> Vec<ChannelConfig>;

    /// Registers a webhook: assigns a fresh id, stamps the creation time,
    /// defaults the frequency tier to medium when unset, and persists the
    /// registration.
    async fn register_webhook(
        &self,
        registration: NewWebhookRegistration,
    ) -> Result<WebhookRegistration, EngineError>;

    /// Removes a webhook registration. Returns false if the id was unknown.
    async fn unregister_webhook(&self, id: &str) -> bool;

    /// Looks up a webhook registration by id.
    async fn webhook_registration(&self, id: &str) -> Option<WebhookRegistration>;

    /// Returns a snapshot of all webhook registrations.
    async fn webhook_registrations(&self) -> Vec<WebhookRegistration>;

    /// Returns all webhook registrations for a channel.
    async fn webhook_registrations_for_channel(
        &self,
        channel_id: &ChannelId,
    ) -> Vec<WebhookRegistration>;
}

/// In-memory store. The sole production implementation today.
pub struct MemoryStore {
    subscribers: RwLock<HashMap<UserId, Subscriber>>,
    channels: RwLock<HashMap<ChannelId, ChannelConfig>>,
    webhooks: RwLock<HashMap<String, WebhookRegistration>>,
    rng: SystemRandom,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
            channels: RwLock::new(HashMap::new()),
            webhooks: RwLock::new(HashMap::new()),
            rng: SystemRandom::new(),
        }
    }

    /// Generates a registration id: a fixed prefix plus a random hex suffix.
    fn generate_registration_id(&self) -> Result<String, EngineError> {
        let mut bytes = [0u8; REGISTRATION_ID_BYTES];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| EngineError::IdGeneration {
                reason: "system entropy source unavailable".to_string(),
            })?;
        Ok(format!("wh_{}", hex::encode(bytes)))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubscriptionStore for MemoryStore {
    async fn subscriber(&self, user_id: &UserId) -> Subscriber {
        self.subscribers
            .read()
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| Subscriber::new(user_id.clone()))
    }

    async fn save_subscriber(&self, subscriber: Subscriber) {
        self.subscribers
            .write()
            .insert(subscriber.user_id.clone(), subscriber);
    }

    async fn delete_subscriber(&self, user_id: &UserId) {
        self.subscribers.write().remove(user_id);
    }

    async fn subscribers(&self) -> Vec<Subscriber> {
        self.subscribers.read().values().cloned().collect()
    }

    async fn channel_config(&self, channel_id: &ChannelId) -> ChannelConfig {
        self.channels
            .read()
            .get(channel_id)
            .cloned()
            .unwrap_or_else(|| ChannelConfig::new(channel_id.clone()))
    }

    async fn save_channel_config(&self, config: ChannelConfig) {
        self.channels
            .write()
            .insert(config.channel_id.clone(), config);
    }

    async fn channel_configs(&self) -> Vec<ChannelConfig> {
        self.channels.read().values().cloned().collect()
    }

    async fn register_webhook(
        &self,
        registration: NewWebhookRegistration,
    ) -> Result<WebhookRegistration, EngineError> {
        let id = self.generate_registration_id()?;
        let stored = WebhookRegistration {
            id: id.clone(),
            channel_id: registration.channel_id,
            webhook_url: registration.webhook_url,
            events: registration.events,
            frequency: registration.frequency.unwrap_or_default(),
            allowed_categories: registration.allowed_categories,
            created_at: Utc::now(),
        };

        self.webhooks.write().insert(id.clone(), stored.clone());
        debug!(registration_id = %id, channel = %stored.channel_id, "Webhook registered");
        Ok(stored)
    }

    async fn unregister_webhook(&self, id: &str) -> bool {
        self.webhooks.write().remove(id).is_some()
    }

    async fn webhook_registration(&self, id: &str) -> Option<WebhookRegistration> {
        self.webhooks.read().get(id).cloned()
    }

    async fn webhook_registrations(&self) -> Vec<WebhookRegistration> {
        self.webhooks.read().values().cloned().collect()
    }

    async fn webhook_registrations_for_channel(
        &self,
        channel_id: &ChannelId,
    ) -> Vec<WebhookRegistration> {
        self.webhooks
            .read()
            .values()
            .filter(|reg| &reg.channel_id == channel_id)
            .cloned()
            .collect()
    }
}
