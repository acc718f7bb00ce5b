//! Event ingress: per-event-kind payload decoders.
//!
//! The backend posts a differently shaped payload for every event kind.
//! Each payload type here decodes one of them and normalizes it into the
//! common [`MarketEvent`] shape the engine consumes. Fields the backend
//! omits fall back to defaults; the renderer's graceful-degradation rules
//! cover the rest, so no further validation happens here.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use coral_core::{BuyDetails, Market, MarketEvent, MarketId, MarketStatus};

/// An outcome entry as the backend sends it on creation events.
#[derive(Debug, Clone, Deserialize)]
pub struct OutcomeEntry {
    /// Backend outcome identifier; unused by the relay.
    #[serde(default)]
    pub id: Option<String>,
    /// Outcome display name.
    pub name: String,
}

/// An outcome entry carrying a final percentage, sent on trading-end events.
#[derive(Debug, Clone, Deserialize)]
pub struct OutcomeWithShare {
    /// Outcome display name.
    pub name: String,
    /// Final percentage share.
    #[serde(default)]
    pub pct: f64,
}

/// Payload of the market-created event.
#[derive(Debug, Deserialize)]
pub struct MarketCreatedPayload {
    /// Market identifier.
    pub market_id: MarketId,
    /// Market title.
    pub title: String,
    /// Market description.
    #[serde(default)]
    pub description: String,
    /// Creator name.
    #[serde(default)]
    pub creator: String,
    /// Market category.
    #[serde(default)]
    pub category: String,
    /// Outcome entries.
    #[serde(default)]
    pub outcomes: Vec<OutcomeEntry>,
    /// Trading start time.
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// Trading end time.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Initial volume.
    #[serde(default)]
    pub volume: f64,
    /// Market page link.
    #[serde(default)]
    pub link: String,
}

impl MarketCreatedPayload {
    /// Normalizes the payload into an announcement event.
    #[must_use]
    pub fn into_event(self) -> MarketEvent {
        let mut market = Market::new(self.market_id, self.title);
        market.description = self.description;
        market.creator = self.creator;
        market.category = self.category;
        market.outcomes = self.outcomes.into_iter().map(|o| o.name).collect();
        market.start_time = self.start_time;
        market.end_time = self.end_time;
        market.volume = self.volume;
        market.status = MarketStatus::Active;
        market.link = self.link;
        MarketEvent::created(market)
    }
}

/// Payload of the periodic market-update event.
#[derive(Debug, Deserialize)]
pub struct MarketUpdatedPayload {
    /// Market identifier.
    pub market_id: MarketId,
    /// Market title.
    pub title: String,
    /// Market category.
    #[serde(default)]
    pub category: String,
    /// Current volume.
    #[serde(default)]
    pub volume: f64,
    /// Outcome names, in display order.
    #[serde(default)]
    pub outcomes: Vec<String>,
    /// Current outcome percentages, index-aligned with `outcomes`.
    #[serde(default)]
    pub percentages: Vec<f64>,
    /// Trading end time.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Market page link.
    #[serde(default)]
    pub link: String,
}

impl MarketUpdatedPayload {
    /// Normalizes the payload into an update event.
    #[must_use]
    pub fn into_event(self) -> MarketEvent {
        let mut market = Market::new(self.market_id, self.title);
        market.category = self.category;
        market.volume = self.volume;
        market.outcomes = self.outcomes;
        market.percentages = self.percentages;
        market.end_time = self.end_time;
        market.status = MarketStatus::Active;
        market.link = self.link;
        MarketEvent::updated(market)
    }
}

/// Payload of the trading-started event.
#[derive(Debug, Deserialize)]
pub struct TradingStartedPayload {
    /// Market identifier.
    pub market_id: MarketId,
    /// Market title.
    pub title: String,
    /// Market description.
    #[serde(default)]
    pub description: String,
    /// Market category.
    #[serde(default)]
    pub category: String,
    /// Outcome names.
    #[serde(default)]
    pub outcomes: Vec<String>,
    /// Market page link.
    #[serde(default)]
    pub link: String,
}

impl TradingStartedPayload {
    /// Normalizes the payload into a trading-started event.
    #[must_use]
    pub fn into_event(self) -> MarketEvent {
        let mut market = Market::new(self.market_id, self.title);
        market.description = self.description;
        market.category = self.category;
        market.outcomes = self.outcomes;
        market.status = MarketStatus::Active;
        market.link = self.link;
        MarketEvent::trading_started(market)
    }
}

/// Payload of the trading-ended event.
#[derive(Debug, Deserialize)]
pub struct TradingEndedPayload {
    /// Market identifier.
    pub market_id: MarketId,
    /// Market title.
    pub title: String,
    /// Market description.
    #[serde(default)]
    pub description: String,
    /// Market category.
    #[serde(default)]
    pub category: String,
    /// Outcomes with their final shares.
    #[serde(default)]
    pub outcomes: Vec<OutcomeWithShare>,
    /// Final pool size.
    #[serde(default)]
    pub final_pool: f64,
    /// Market page link.
    #[serde(default)]
    pub link: String,
}

impl TradingEndedPayload {
    /// Normalizes the payload into a trading-ended event.
    #[must_use]
    pub fn into_event(self) -> MarketEvent {
        let mut market = Market::new(self.market_id, self.title);
        market.description = self.description;
        market.category = self.category;
        market.percentages = self.outcomes.iter().map(|o| o.pct).collect();
        market.outcomes = self.outcomes.into_iter().map(|o| o.name).collect();
        market.volume = self.final_pool;
        market.status = MarketStatus::Closed;
        market.link = self.link;
        MarketEvent::trading_ended(market)
    }
}

/// Payload of the market-resolved event.
#[derive(Debug, Deserialize)]
pub struct MarketResolvedPayload {
    /// Market identifier.
    pub market_id: MarketId,
    /// Market title.
    pub title: String,
    /// Market category.
    #[serde(default)]
    pub category: String,
    /// Winning outcome name, if disclosed.
    #[serde(default)]
    pub winning_outcome: Option<String>,
    /// Total pool size.
    #[serde(default)]
    pub total_pool: f64,
    /// Market page link.
    #[serde(default)]
    pub link: String,
}

impl MarketResolvedPayload {
    /// Normalizes the payload into a resolution event.
    #[must_use]
    pub fn into_event(self) -> MarketEvent {
        let mut market = Market::new(self.market_id, self.title);
        market.category = self.category;
        market.resolved_outcome = self.winning_outcome.filter(|o| !o.is_empty());
        market.volume = self.total_pool;
        market.status = MarketStatus::Resolved;
        market.link = self.link;
        MarketEvent::resolved(market)
    }
}

/// Payload of the market-buy event.
#[derive(Debug, Deserialize)]
pub struct MarketBuyPayload {
    /// Market identifier.
    pub market_id: MarketId,
    /// Market title.
    pub title: String,
    /// Market category.
    #[serde(default)]
    pub category: String,
    /// Amount spent.
    #[serde(default)]
    pub amount: f64,
    /// Outcome bought.
    #[serde(default)]
    pub outcome: String,
    /// Buyer display name, if disclosed.
    #[serde(default)]
    pub buyer: Option<String>,
    /// Market page link.
    #[serde(default)]
    pub link: String,
}

impl MarketBuyPayload {
    /// Normalizes the payload into a buy event.
    #[must_use]
    pub fn into_event(self) -> MarketEvent {
        let mut market = Market::new(self.market_id, self.title);
        market.category = self.category;
        market.link = self.link;
        MarketEvent::buy(
            market,
            BuyDetails {
                amount: self.amount,
                outcome: self.outcome,
                buyer: self.buyer,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coral_core::EventKind;

    #[test]
    fn test_market_created_minimal() {
        let payload: MarketCreatedPayload =
            serde_json::from_str(r#"{"market_id": "m1", "title": "T"}"#).unwrap();
        let event = payload.into_event();

        assert_eq!(event.kind(), EventKind::MarketCreated);
        let market = event.market();
        assert!(market.outcomes.is_empty());
        assert!(market.percentages.is_empty());
        assert_eq!(market.status, MarketStatus::Active);
    }

    #[test]
    fn test_market_created_outcome_names() {
        let payload: MarketCreatedPayload = serde_json::from_str(
            r#"{
                "market_id": "m1",
                "title": "T",
                "outcomes": [{"id": "o1", "name": "Yes"}, {"name": "No"}],
                "end_time": "2030-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        let event = payload.into_event();

        assert_eq!(event.market().outcomes, vec!["Yes", "No"]);
        assert!(event.market().end_time.is_some());
    }

    #[test]
    fn test_market_updated_carries_volume() {
        let payload: MarketUpdatedPayload = serde_json::from_str(
            r#"{"market_id": "m1", "title": "T", "volume": 512.25}"#,
        )
        .unwrap();
        let event = payload.into_event();

        assert_eq!(event.kind(), EventKind::MarketUpdated);
        assert!((event.market().volume - 512.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_trading_ended_aligns_shares() {
        let payload: TradingEndedPayload = serde_json::from_str(
            r#"{
                "market_id": "m1",
                "title": "T",
                "outcomes": [{"name": "Yes", "pct": 61.5}, {"name": "No", "pct": 38.5}],
                "final_pool": 900.0
            }"#,
        )
        .unwrap();
        let event = payload.into_event();
        let market = event.market();

        assert_eq!(market.status, MarketStatus::Closed);
        assert_eq!(market.outcomes, vec!["Yes", "No"]);
        assert!((market.percentage_for(0) - 61.5).abs() < f64::EPSILON);
        assert!((market.volume - 900.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_market_resolved_empty_outcome_is_none() {
        let payload: MarketResolvedPayload = serde_json::from_str(
            r#"{"market_id": "m1", "title": "T", "winning_outcome": ""}"#,
        )
        .unwrap();
        let event = payload.into_event();

        assert_eq!(event.market().status, MarketStatus::Resolved);
        assert!(event.market().resolved_outcome.is_none());
    }

    #[test]
    fn test_market_buy_details() {
        let payload: MarketBuyPayload = serde_json::from_str(
            r#"{"market_id": "m1", "title": "T", "amount": 10.5, "outcome": "Yes"}"#,
        )
        .unwrap();

        let MarketEvent::MarketBuy { trade, .. } = payload.into_event() else {
            panic!("expected buy event");
        };
        assert!((trade.amount - 10.5).abs() < f64::EPSILON);
        assert_eq!(trade.outcome, "Yes");
        assert!(trade.buyer.is_none());
    }
}
