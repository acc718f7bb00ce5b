//! Per-user subscription records.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{MarketId, UserId};

/// A user's notification interests: the markets and creators they follow.
///
/// Both interest collections are sets, so subscribing twice is a no-op and
/// membership is a plain equality test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    /// Chat-platform user identifier.
    pub user_id: UserId,
    /// Subscribed market identifiers.
    #[serde(default)]
    pub markets: HashSet<MarketId>,
    /// Subscribed creator names.
    #[serde(default)]
    pub creators: HashSet<String>,
}

impl Subscriber {
    /// Creates an empty subscription record for a user.
    #[must_use]
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            markets: HashSet::new(),
            creators: HashSet::new(),
        }
    }

    /// Adds a market subscription. Returns false if already subscribed.
    pub fn subscribe_market(&mut self, market_id: impl Into<MarketId>) -> bool {
        self.markets.insert(market_id.into())
    }

    /// Removes a market subscription. Returns false if not subscribed.
    pub fn unsubscribe_market(&mut self, market_id: &MarketId) -> bool {
        self.markets.remove(market_id)
    }

    /// Adds a creator subscription. Returns false if already subscribed.
    pub fn subscribe_creator(&mut self, creator: impl Into<String>) -> bool {
        self.creators.insert(creator.into())
    }

    /// Removes a creator subscription. Returns false if not subscribed.
    pub fn unsubscribe_creator(&mut self, creator: &str) -> bool {
        self.creators.remove(creator)
    }

    /// Returns true if the record holds no interests at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markets.is_empty() && self.creators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_market_idempotent() {
        let mut sub = Subscriber::new("u1");
        assert!(sub.subscribe_market("m1"));
        assert!(!sub.subscribe_market("m1"));
        assert_eq!(sub.markets.len(), 1);
    }

    #[test]
    fn test_unsubscribe_missing_is_noop() {
        let mut sub = Subscriber::new("u1");
        sub.subscribe_market("m1");
        assert!(!sub.unsubscribe_market(&MarketId::new("m2")));
        assert_eq!(sub.markets.len(), 1);
    }

    #[test]
    fn test_creator_set() {
        let mut sub = Subscriber::new("u1");
        assert!(sub.subscribe_creator("alice"));
        assert!(!sub.subscribe_creator("alice"));
        assert!(sub.unsubscribe_creator("alice"));
        assert!(sub.is_empty());
    }
}
