//! Request handlers.

pub mod channels;
pub mod events;
pub mod health;
pub mod notifications;
pub mod subscriptions;
pub mod webhooks;
