//! Per-channel feed configuration.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ChannelId;

/// How often a channel wants periodic market updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyTier {
    /// One update every three hours at most.
    Low,
    /// One update per hour at most.
    #[default]
    Medium,
    /// One update every thirty minutes at most.
    High,
}

impl FrequencyTier {
    /// Parses a tier from its wire name. Unrecognized values fall back to
    /// [`FrequencyTier::Medium`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }
}

impl fmt::Display for FrequencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Feed configuration for a chat channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel identifier.
    pub channel_id: ChannelId,
    /// Whether the market feed is enabled for this channel.
    #[serde(default = "default_feed_enabled")]
    pub feed_enabled: bool,
    /// Categories the channel accepts; empty means all categories.
    #[serde(default)]
    pub allowed_categories: HashSet<String>,
    /// Update cadence tier.
    #[serde(default)]
    pub frequency: FrequencyTier,
    /// When the channel last received a periodic update. `None` means never.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
}

fn default_feed_enabled() -> bool {
    true
}

impl ChannelConfig {
    /// Creates a default configuration for a channel: feed enabled, no
    /// category restriction, medium frequency, never updated.
    #[must_use]
    pub fn new(channel_id: impl Into<ChannelId>) -> Self {
        Self {
            channel_id: channel_id.into(),
            feed_enabled: default_feed_enabled(),
            allowed_categories: HashSet::new(),
            frequency: FrequencyTier::default(),
            last_update: None,
        }
    }

    /// Returns true if the channel accepts markets of the given category.
    /// An empty allow-list accepts everything.
    #[must_use]
    pub fn allows_category(&self, category: &str) -> bool {
        self.allowed_categories.is_empty() || self.allowed_categories.contains(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_parse() {
        assert_eq!(FrequencyTier::parse("low"), FrequencyTier::Low);
        assert_eq!(FrequencyTier::parse("medium"), FrequencyTier::Medium);
        assert_eq!(FrequencyTier::parse("high"), FrequencyTier::High);
        // Unknown values degrade to medium rather than erroring.
        assert_eq!(FrequencyTier::parse("hourly"), FrequencyTier::Medium);
        assert_eq!(FrequencyTier::parse(""), FrequencyTier::Medium);
    }

    #[test]
    fn test_channel_config_defaults() {
        let config = ChannelConfig::new("ch-1");
        assert!(config.feed_enabled);
        assert!(config.allowed_categories.is_empty());
        assert_eq!(config.frequency, FrequencyTier::Medium);
        assert!(config.last_update.is_none());
    }

    #[test]
    fn test_allows_category_empty_is_unrestricted() {
        let config = ChannelConfig::new("ch-1");
        assert!(config.allows_category("sports"));
        assert!(config.allows_category(""));
    }

    #[test]
    fn test_allows_category_filters() {
        let mut config = ChannelConfig::new("ch-1");
        config.allowed_categories.insert("politics".to_string());

        assert!(config.allows_category("politics"));
        assert!(!config.allows_category("sports"));
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: ChannelConfig = serde_json::from_str(r#"{"channel_id": "ch-1"}"#).unwrap();
        assert!(config.feed_enabled);
        assert_eq!(config.frequency, FrequencyTier::Medium);
    }
}
