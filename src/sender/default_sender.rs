//! # Default Message Sender
//!
//! The built-in sender implementation, publishing to an in-process tokio
//! broadcast channel per process. Broker bridges subscribe to the channel
//! and forward envelopes to the external transport; test code subscribes
//! directly.

use crate::constants::DEFAULT_SENDER_ID;
use crate::error::{NotifyError, Result};
use crate::events::translator::{MessageHeaders, WireMessage};
use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::MessageSender;

/// Envelope fanned out to channel subscribers for each published message.
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub message_id: Uuid,
    pub topic: String,
    pub headers: MessageHeaders,
    pub body: serde_json::Value,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

/// Built-in message sender backed by a broadcast channel.
///
/// The channel is created by `init`; publishing before initialization is
/// an error. Publishing with no subscribers is not.
pub struct DefaultMessageSender {
    capacity: usize,
    channel: RwLock<Option<broadcast::Sender<PublishedMessage>>>,
}

impl DefaultMessageSender {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            channel: RwLock::new(None),
        }
    }

    /// Subscribe to published messages. Fails before initialization.
    pub fn subscribe(&self) -> Result<broadcast::Receiver<PublishedMessage>> {
        self.channel
            .read()
            .as_ref()
            .map(|sender| sender.subscribe())
            .ok_or_else(|| NotifyError::SenderNotInitialized {
                sender: DEFAULT_SENDER_ID.to_string(),
            })
    }

    /// Number of active channel subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.channel
            .read()
            .as_ref()
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for DefaultMessageSender {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[async_trait]
impl MessageSender for DefaultMessageSender {
    fn name(&self) -> &str {
        DEFAULT_SENDER_ID
    }

    async fn init(&self) -> Result<()> {
        let mut channel = self.channel.write();
        if channel.is_none() {
            let (sender, _) = broadcast::channel(self.capacity);
            *channel = Some(sender);
        }
        Ok(())
    }

    async fn send_to_topic(&self, topic: &str, message: &WireMessage) -> Result<()> {
        let sender = {
            let channel = self.channel.read();
            channel
                .as_ref()
                .cloned()
                .ok_or_else(|| NotifyError::SenderNotInitialized {
                    sender: DEFAULT_SENDER_ID.to_string(),
                })?
        };

        let envelope = PublishedMessage {
            message_id: Uuid::new_v4(),
            topic: topic.to_string(),
            headers: message.headers.clone(),
            body: message.body.clone(),
            published_at: chrono::Utc::now(),
        };

        // send() errors only when there are no subscribers; messages are
        // still considered published in that case
        match sender.send(envelope) {
            Ok(_) => Ok(()),
            Err(broadcast::error::SendError(_)) => Ok(()),
        }
    }
}
