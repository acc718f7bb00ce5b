//! # Coral Engine
//!
//! The notification core of the Coral Markets relay.
//!
//! This crate provides:
//! - [`store::SubscriptionStore`] - subscription, channel, and webhook
//!   registration storage (in-memory implementation: [`store::MemoryStore`])
//! - [`policy`] - pure notification decisions (per-user interest match,
//!   per-channel update cadence)
//! - [`render`] - market event message rendering
//! - [`gateway::ChatGateway`] - chat delivery seam with in-memory and HTTP
//!   implementations
//! - [`dispatch::Dispatcher`] - the fan-out loop over channels and users
//!
//! # Architecture
//!
//! Event ingress normalizes inbound payloads into `MarketEvent`s; the
//! renderer turns an event into a message; the dispatcher walks every
//! channel configuration and every subscriber, asks the policy functions
//! whether to deliver, and hands accepted deliveries to the gateway. A
//! failed delivery is logged and skipped; it never aborts the pass.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

/// Fan-out dispatcher
pub mod dispatch;

/// Engine error types
pub mod error;

/// Chat delivery gateway
pub mod gateway;

/// Notification policy decisions
pub mod policy;

/// Market event message rendering
pub mod render;

/// Subscription storage
pub mod store;

pub use dispatch::{DispatchSummary, Dispatcher};
pub use error::EngineError;
pub use gateway::{ChatGateway, HttpGateway, RecordingGateway};
pub use store::{MemoryStore, SubscriptionStore};
