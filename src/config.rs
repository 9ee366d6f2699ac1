//! # Notifier Configuration
//!
//! Process-level settings for the notification subsystem, read once at
//! startup. The only setting that affects correctness is
//! `preferred_sender`, which steers sender resolution when more than one
//! candidate is discovered.

use crate::error::{NotifyError, Result};

#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Identifier of the preferred message sender. Empty means unset;
    /// resolution then falls back to the built-in default identifier.
    pub preferred_sender: String,
    /// Upper bound on a single publish call, including broker I/O.
    pub publish_timeout_ms: u64,
    /// Topic build status messages are published to.
    pub topic: String,
    /// Capacity of the in-process broadcast channel backing the default sender.
    pub channel_capacity: usize,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            preferred_sender: String::new(),
            publish_timeout_ms: 5000,
            topic: crate::constants::DEFAULT_TOPIC.to_string(),
            channel_capacity: 1000,
        }
    }
}

impl NotifierConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(sender) = std::env::var("BUILDNOTIFY_MESSAGE_SENDER") {
            config.preferred_sender = sender;
        }

        if let Ok(timeout) = std::env::var("BUILDNOTIFY_PUBLISH_TIMEOUT_MS") {
            config.publish_timeout_ms = timeout.parse().map_err(|e| {
                NotifyError::configuration("NotifierConfig", format!("Invalid publish_timeout_ms: {e}"))
            })?;
        }

        if let Ok(topic) = std::env::var("BUILDNOTIFY_TOPIC") {
            config.topic = topic;
        }

        Ok(config)
    }

    /// The configured preferred sender identifier, or `None` when unset.
    pub fn preferred_sender(&self) -> Option<&str> {
        if self.preferred_sender.is_empty() {
            None
        } else {
            Some(&self.preferred_sender)
        }
    }
}
