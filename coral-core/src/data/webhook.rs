//! External webhook registrations.
//!
//! Registrations record an external delivery target and its filter
//! preferences. They are stored and exposed over the administrative surface
//! but are not currently consulted during fan-out; the dispatcher iterates
//! channel configurations directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::channel::FrequencyTier;
use super::event::EventKind;
use crate::types::ChannelId;

/// A stored webhook registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookRegistration {
    /// Generated registration identifier (`wh_` followed by a hex suffix).
    pub id: String,
    /// Channel the registration belongs to.
    pub channel_id: ChannelId,
    /// Delivery URL.
    pub webhook_url: String,
    /// Event kinds the registrant is interested in; empty means all.
    #[serde(default)]
    pub events: Vec<EventKind>,
    /// Update cadence tier.
    #[serde(default)]
    pub frequency: FrequencyTier,
    /// Categories the registrant accepts; empty means all.
    #[serde(default)]
    pub allowed_categories: Vec<String>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a registration. The store assigns the identifier
/// and creation time.
#[derive(Debug, Clone, Deserialize)]
pub struct NewWebhookRegistration {
    /// Channel the registration belongs to.
    pub channel_id: ChannelId,
    /// Delivery URL.
    pub webhook_url: String,
    /// Event kinds of interest; empty means all.
    #[serde(default)]
    pub events: Vec<EventKind>,
    /// Cadence tier; defaults to medium when omitted.
    #[serde(default)]
    pub frequency: Option<FrequencyTier>,
    /// Category allow-list; empty means all.
    #[serde(default)]
    pub allowed_categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registration_deserialize_minimal() {
        let reg: NewWebhookRegistration = serde_json::from_str(
            r#"{"channel_id": "ch-1", "webhook_url": "https://example.com/hook"}"#,
        )
        .unwrap();

        assert_eq!(reg.channel_id.as_str(), "ch-1");
        assert!(reg.events.is_empty());
        assert!(reg.frequency.is_none());
    }

    #[test]
    fn test_new_registration_deserialize_full() {
        let reg: NewWebhookRegistration = serde_json::from_str(
            r#"{
                "channel_id": "ch-1",
                "webhook_url": "https://example.com/hook",
                "events": ["market_created", "market_resolved"],
                "frequency": "high",
                "allowed_categories": ["politics"]
            }"#,
        )
        .unwrap();

        assert_eq!(reg.events.len(), 2);
        assert_eq!(reg.frequency, Some(FrequencyTier::High));
        assert_eq!(reg.allowed_categories, vec!["politics".to_string()]);
    }
}
