//! Notification policy decisions.
//!
//! Both decisions are pure functions: the per-user interest match and the
//! per-channel update cadence. Cadence state (`last_update`) is supplied by
//! the caller and never mutated here; the dispatcher records the new
//! timestamp after a successful send.

use chrono::{DateTime, TimeDelta, Utc};

use coral_core::{FrequencyTier, Market, Subscriber};

/// Returns true if the subscriber should be notified about the market:
/// either the market itself or its creator is in the subscriber's interest
/// sets.
#[must_use]
pub fn should_notify_user(subscriber: &Subscriber, market: &Market) -> bool {
    subscriber.markets.contains(&market.id) || subscriber.creators.contains(&market.creator)
}

/// Decides whether a periodic update may be sent to a channel now.
///
/// Rules, in order:
/// 1. Non-active markets never receive periodic updates.
/// 2. Markets within six hours of their end time get denser updates: at
///    least fifteen minutes must have passed since the last one, whatever
///    the configured tier.
/// 3. Otherwise the tier threshold applies: high every thirty minutes,
///    medium hourly, low every three hours. (Unrecognized tier strings are
///    already mapped to medium by [`FrequencyTier::parse`].)
///
/// A channel that has never been updated (`last_update` of `None`) always
/// passes the elapsed-time check. Markets with no end time skip the
/// closing-soon override and go straight to the tier threshold.
#[must_use]
pub fn should_send_update(
    market: &Market,
    tier: FrequencyTier,
    last_update: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    if !market.status.is_active() {
        return false;
    }

    let Some(last_update) = last_update else {
        return true;
    };
    let elapsed = now - last_update;

    if let Some(end_time) = market.end_time {
        if end_time - now < TimeDelta::hours(6) {
            return elapsed >= TimeDelta::minutes(15);
        }
    }

    let threshold = match tier {
        FrequencyTier::High => TimeDelta::minutes(30),
        FrequencyTier::Medium => TimeDelta::hours(1),
        FrequencyTier::Low => TimeDelta::hours(3),
    };
    elapsed >= threshold
}
