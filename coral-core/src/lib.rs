//! # Coral Core
//!
//! Domain model for the Coral Markets notification relay.
//!
//! This crate provides:
//! - `NewType` wrappers for platform identifiers (`MarketId`, `UserId`, `ChannelId`)
//! - Market data structures (`Market`, `MarketStatus`, `MarketEvent`)
//! - Subscription records (`Subscriber`)
//! - Channel feed configuration (`ChannelConfig`, `FrequencyTier`)
//! - Webhook registration records (`WebhookRegistration`)
//!
//! The crate is purely data: no policy decisions, no I/O. Everything here is
//! shared between the notification engine and the HTTP ingress.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

/// Market, event, subscription, and configuration data structures
pub mod data;

/// Identifier `NewType` wrappers
pub mod types;

pub use data::{
    BuyDetails, ChannelConfig, EventKind, FrequencyTier, Market, MarketEvent, MarketStatus,
    NewWebhookRegistration, Subscriber, WebhookRegistration,
};
pub use types::{ChannelId, MarketId, UserId};
