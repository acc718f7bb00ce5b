//! Engine error types.

use coral_core::UserId;

/// Errors produced by the notification engine.
///
/// Only two operations can fail: registration id generation (entropy source)
/// and delivery through the chat gateway. Both are local failures: the
/// dispatcher logs delivery errors and moves on, and a failed id generation
/// aborts only the registration attempt in progress.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// The registration id could not be generated.
    #[error("Failed to generate registration id: {reason}")]
    IdGeneration {
        /// Error reason.
        reason: String,
    },

    /// A message could not be delivered to a channel.
    #[error("Delivery to channel {channel} failed: {reason}")]
    Delivery {
        /// Target channel.
        channel: String,
        /// Error reason.
        reason: String,
    },

    /// A direct-message channel could not be opened for a user.
    #[error("Failed to open direct-message channel for {user}: {reason}")]
    DirectChannel {
        /// Target user.
        user: UserId,
        /// Error reason.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = EngineError::Delivery {
            channel: "ch-1".to_string(),
            reason: "HTTP 503".to_string(),
        };
        assert!(error.to_string().contains("ch-1"));
        assert!(error.to_string().contains("HTTP 503"));
    }
}
