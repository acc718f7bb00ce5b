//! Market event message rendering.
//!
//! One function per event kind, each a pure function of the market (plus,
//! for buys, the transaction details). Rendering cannot fail: a percentage
//! missing for an outcome index renders as 0.0, an absent buyer renders as
//! "Anonymous", and an unresolved outcome renders as a generic statement.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use humantime::format_duration;

use coral_core::{BuyDetails, Market, MarketEvent};

/// Renders an event into its chat message. `now` anchors the time-remaining
/// display for announcement and update messages.
#[must_use]
pub fn render(event: &MarketEvent, now: DateTime<Utc>) -> String {
    match event {
        MarketEvent::MarketCreated { market } => announcement(market, now),
        MarketEvent::MarketUpdated { market } => update(market, now),
        MarketEvent::TradingStarted { market } => trading_started(market),
        MarketEvent::TradingEnded { market } => trading_ended(market),
        MarketEvent::MarketResolved { market } => resolution(market),
        MarketEvent::MarketBuy { market, trade } => buy(market, trade),
    }
}

/// Renders the new-market announcement.
#[must_use]
pub fn announcement(market: &Market, now: DateTime<Utc>) -> String {
    let mut message = format!(
        "🎉 **NEW MARKET ALERT** 🎉\n\n\
         **{}**\n\
         {}\n\n\
         📊 Volume: ${:.2}\n\
         ⏰ Time Left: {}\n\n\
         **Outcomes:**\n",
        market.title,
        market.description,
        market.volume,
        format_duration(market.time_remaining(now)),
    );
    push_outcomes(&mut message, market);
    push_link(&mut message, market);
    message
}

/// Renders the periodic market update.
#[must_use]
pub fn update(market: &Market, now: DateTime<Utc>) -> String {
    let mut message = format!(
        "📈 **MARKET UPDATE** 📈\n\n\
         **{}**\n\n\
         📊 Volume: ${:.2}\n\
         ⏰ Time Left: {}\n\n\
         **Current Probabilities:**\n",
        market.title,
        market.volume,
        format_duration(market.time_remaining(now)),
    );
    push_outcomes(&mut message, market);
    push_link(&mut message, market);
    message
}

/// Renders the trading-started message.
#[must_use]
pub fn trading_started(market: &Market) -> String {
    format!(
        "🟢 **TRADING STARTED** 🟢\n\n\
         **{}**\n\n\
         Trading is now open! Place your bets.\n\n\
         🔗 [View on Coral Markets]({})",
        market.title, market.link,
    )
}

/// Renders the trading-ended message.
#[must_use]
pub fn trading_ended(market: &Market) -> String {
    format!(
        "🔴 **TRADING CLOSED** 🔴\n\n\
         **{}**\n\n\
         Betting is now closed. Market will resolve soon.\n\n\
         🔗 [View on Coral Markets]({})",
        market.title, market.link,
    )
}

/// Renders the resolution message. Includes the winning outcome when known.
#[must_use]
pub fn resolution(market: &Market) -> String {
    let verdict = match &market.resolved_outcome {
        Some(outcome) => format!("Resolved: **{outcome}**"),
        None => "Market resolved".to_string(),
    };

    format!(
        "✅ **MARKET RESOLVED** ✅\n\n\
         **{}**\n\n\
         {}\n\n\
         🔗 [View on Coral Markets]({})",
        market.title, verdict, market.link,
    )
}

/// Renders the buy message.
#[must_use]
pub fn buy(market: &Market, trade: &BuyDetails) -> String {
    let buyer = trade.buyer.as_deref().filter(|b| !b.is_empty());

    format!(
        "💸 **MARKET BUY** 💸\n\n\
         **{}**\n\n\
         Buyer: {}\n\
         Amount: ${:.2}\n\
         Outcome: {}\n\n\
         🔗 [View on Coral Markets]({})",
        market.title,
        buyer.unwrap_or("Anonymous"),
        trade.amount,
        trade.outcome,
        market.link,
    )
}

fn push_outcomes(message: &mut String, market: &Market) {
    for (index, outcome) in market.outcomes.iter().enumerate() {
        let _ = writeln!(message, "- {} ({:.1}%)", outcome, market.percentage_for(index));
    }
}

fn push_link(message: &mut String, market: &Market) {
    let _ = write!(message, "\n🔗 [View on Coral Markets]({})", market.link);
}
