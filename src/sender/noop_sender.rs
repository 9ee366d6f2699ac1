//! No-op sender for environments where messaging is configured off but a
//! sender implementation must still be present.

use crate::error::Result;
use crate::events::translator::WireMessage;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use super::MessageSender;

pub const NOOP_SENDER_ID: &str = "NoopMessageSender";

/// Sender that accepts and drops every message.
#[derive(Debug, Default)]
pub struct NoopMessageSender {
    dropped: AtomicU64,
}

impl NoopMessageSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages accepted and dropped so far.
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl MessageSender for NoopMessageSender {
    fn name(&self) -> &str {
        NOOP_SENDER_ID
    }

    async fn init(&self) -> Result<()> {
        Ok(())
    }

    async fn send_to_topic(&self, topic: &str, _message: &WireMessage) -> Result<()> {
        self.dropped.fetch_add(1, Ordering::Relaxed);
        debug!(topic = %topic, "NoopMessageSender dropped message");
        Ok(())
    }
}
