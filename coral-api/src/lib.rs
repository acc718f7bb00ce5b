//! # Coral API
//!
//! HTTP ingress for the Coral Markets notification relay.
//!
//! This crate provides:
//! - Webhook event endpoints that normalize backend payloads and trigger
//!   fan-out
//! - The administrative surface: subscriptions, channel feed settings, and
//!   webhook registrations
//! - Shared-secret authentication middleware
//! - Direct-notification endpoint for one-off DMs
//!
//! # Architecture
//!
//! Routes live under `/api/v1`:
//! - `/events/*` - normalized market lifecycle events
//! - `/subscriptions/*` - per-user market/creator subscriptions
//! - `/channels/*` - channel feed configuration
//! - `/webhooks` - webhook registration CRUD
//! - `/notifications/dm` - direct message to a single user
//! - `/health` - health check (unauthenticated)
//!
//! # Authentication
//!
//! Every endpoint except `/health` accepts either an `X-API-Key` header or
//! an `Authorization: Bearer <token>` header, checked against statically
//! configured secrets. When no secret is configured the surface is open.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod ingress;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{ApiConfig, AuthConfig};
pub use error::ApiError;
pub use server::ApiServer;
pub use state::AppState;
