//! Market data as delivered by the Coral Markets backend.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::MarketId;

/// Lifecycle status of a market.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketStatus {
    /// Trading is open; the market receives periodic volume updates.
    #[default]
    Active,
    /// Trading has ended but the market has not yet resolved.
    Closed,
    /// The market has resolved to an outcome.
    Resolved,
}

impl MarketStatus {
    /// Returns true if the market is open for trading.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Closed => write!(f, "closed"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

/// A prediction market.
///
/// Events carry a `Market` that is fully or partially populated depending on
/// the event kind; absent fields fall back to their defaults. `percentages`
/// is index-aligned with `outcomes` and may be shorter or empty, so use
/// [`Market::percentage_for`] rather than indexing directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    /// Market identifier.
    #[serde(rename = "market_id")]
    pub id: MarketId,
    /// Market title.
    pub title: String,
    /// Market description.
    #[serde(default)]
    pub description: String,
    /// Outcome names, in display order.
    #[serde(default)]
    pub outcomes: Vec<String>,
    /// Per-outcome percentages, index-aligned with `outcomes`.
    #[serde(default)]
    pub percentages: Vec<f64>,
    /// Market category (e.g. "politics", "sports").
    #[serde(default)]
    pub category: String,
    /// Creator name.
    #[serde(default)]
    pub creator: String,
    /// Cumulative traded volume.
    #[serde(default)]
    pub volume: f64,
    /// Trading start time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Trading end time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: MarketStatus,
    /// Winning outcome name, set once resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_outcome: Option<String>,
    /// Canonical link to the market page.
    #[serde(default)]
    pub link: String,
}

impl Market {
    /// Creates a market with the given id and title; everything else starts
    /// at its default.
    #[must_use]
    pub fn new(id: impl Into<MarketId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            outcomes: Vec::new(),
            percentages: Vec::new(),
            category: String::new(),
            creator: String::new(),
            volume: 0.0,
            start_time: None,
            end_time: None,
            status: MarketStatus::default(),
            resolved_outcome: None,
            link: String::new(),
        }
    }

    /// Returns the percentage for the outcome at `index`, or 0.0 when the
    /// percentage list does not cover it.
    #[must_use]
    pub fn percentage_for(&self, index: usize) -> f64 {
        self.percentages.get(index).copied().unwrap_or(0.0)
    }

    /// Returns the time remaining until the market's end time, clamped to
    /// zero for markets already past it or with no end time.
    #[must_use]
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Duration {
        self.end_time
            .and_then(|end| (end - now).to_std().ok())
            .unwrap_or(Duration::ZERO)
    }
}
