//! Market lifecycle events consumed by the renderer and dispatcher.
//!
//! Event ingress normalizes each inbound payload into a [`MarketEvent`]
//! carrying the common [`Market`] shape; from that point on the engine does
//! not care which wire format the event arrived in.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::market::Market;

/// Event kind enumeration, used for filtering and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new market was created.
    MarketCreated,
    /// Periodic market update (volume, probabilities).
    MarketUpdated,
    /// Trading opened on a market.
    TradingStarted,
    /// Trading closed on a market.
    TradingEnded,
    /// The market resolved to an outcome.
    MarketResolved,
    /// A position was bought on a market.
    MarketBuy,
}

impl EventKind {
    /// Returns true if notifications of this kind are subject to the
    /// per-channel cadence decision. Only periodic updates are; every other
    /// kind fans out once per occurrence.
    #[must_use]
    pub const fn is_cadence_gated(&self) -> bool {
        matches!(self, Self::MarketUpdated)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarketCreated => write!(f, "market_created"),
            Self::MarketUpdated => write!(f, "market_updated"),
            Self::TradingStarted => write!(f, "trading_started"),
            Self::TradingEnded => write!(f, "trading_ended"),
            Self::MarketResolved => write!(f, "market_resolved"),
            Self::MarketBuy => write!(f, "market_buy"),
        }
    }
}

/// Transaction details attached to a buy event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyDetails {
    /// Amount spent, in platform currency.
    pub amount: f64,
    /// Name of the outcome bought.
    pub outcome: String,
    /// Buyer display name, if disclosed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<String>,
}

/// A market lifecycle event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarketEvent {
    /// A new market was created.
    MarketCreated {
        /// Market details.
        market: Market,
    },
    /// Periodic market update.
    MarketUpdated {
        /// Market details.
        market: Market,
    },
    /// Trading opened.
    TradingStarted {
        /// Market details.
        market: Market,
    },
    /// Trading closed.
    TradingEnded {
        /// Market details.
        market: Market,
    },
    /// Market resolved.
    MarketResolved {
        /// Market details.
        market: Market,
    },
    /// A position was bought.
    MarketBuy {
        /// Market details.
        market: Market,
        /// Transaction details.
        trade: BuyDetails,
    },
}

impl MarketEvent {
    /// Returns the market this event concerns.
    #[must_use]
    pub fn market(&self) -> &Market {
        match self {
            Self::MarketCreated { market }
            | Self::MarketUpdated { market }
            | Self::TradingStarted { market }
            | Self::TradingEnded { market }
            | Self::MarketResolved { market }
            | Self::MarketBuy { market, .. } => market,
        }
    }

    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::MarketCreated { .. } => EventKind::MarketCreated,
            Self::MarketUpdated { .. } => EventKind::MarketUpdated,
            Self::TradingStarted { .. } => EventKind::TradingStarted,
            Self::TradingEnded { .. } => EventKind::TradingEnded,
            Self::MarketResolved { .. } => EventKind::MarketResolved,
            Self::MarketBuy { .. } => EventKind::MarketBuy,
        }
    }

    /// Creates a market-created event.
    #[must_use]
    pub fn created(market: Market) -> Self {
        Self::MarketCreated { market }
    }

    /// Creates a market-updated event.
    #[must_use]
    pub fn updated(market: Market) -> Self {
        Self::MarketUpdated { market }
    }

    /// Creates a trading-started event.
    #[must_use]
    pub fn trading_started(market: Market) -> Self {
        Self::TradingStarted { market }
    }

    /// Creates a trading-ended event.
    #[must_use]
    pub fn trading_ended(market: Market) -> Self {
        Self::TradingEnded { market }
    }

    /// Creates a market-resolved event.
    #[must_use]
    pub fn resolved(market: Market) -> Self {
        Self::MarketResolved { market }
    }

    /// Creates a buy event.
    #[must_use]
    pub fn buy(market: Market, trade: BuyDetails) -> Self {
        Self::MarketBuy { market, trade }
    }
}
