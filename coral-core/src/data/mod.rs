//! Data structures shared between the notification engine and the ingress.

mod channel;
mod event;
mod market;
mod subscriber;
mod webhook;

pub use channel::{ChannelConfig, FrequencyTier};
pub use event::{BuyDetails, EventKind, MarketEvent};
pub use market::{Market, MarketStatus};
pub use subscriber::Subscriber;
pub use webhook::{NewWebhookRegistration, WebhookRegistration};
