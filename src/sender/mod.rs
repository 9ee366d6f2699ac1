//! # Message Senders
//!
//! The broker-client capability of the notification subsystem and its
//! built-in implementations.
//!
//! ## Overview
//!
//! A [`MessageSender`] publishes wire messages to a named topic. Multiple
//! implementations may be discovered at process start (real broker client,
//! disabled client, test double); [`selector::resolve_sender`] picks exactly
//! one of them (or none) for the process lifetime.
//!
//! ## Available Senders
//!
//! - **DefaultMessageSender**: the built-in sender, bridging to an
//!   in-process broadcast topic; external broker transports plug in behind
//!   the same trait.
//! - **NoopMessageSender**: accepts and drops every message, for
//!   environments where messaging is configured off.

pub mod default_sender;
pub mod noop_sender;
pub mod selector;

pub use default_sender::{DefaultMessageSender, PublishedMessage};
pub use noop_sender::NoopMessageSender;
pub use selector::{resolve_sender, ResolvedSender};

use crate::error::Result;
use crate::events::translator::WireMessage;
use async_trait::async_trait;

/// Capability of publishing wire messages to an external broker topic.
///
/// Implementations expose a stable identifier used by sender resolution,
/// and must tolerate `init` being awaited exactly once before the first
/// `send_to_topic` call.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Stable identifier of this sender implementation.
    fn name(&self) -> &str;

    /// One-time initialization hook, invoked by sender resolution on the
    /// winning candidate before any publish.
    async fn init(&self) -> Result<()>;

    /// Publish a wire message to the given topic. May block on network I/O;
    /// callers bound it with a timeout.
    async fn send_to_topic(&self, topic: &str, message: &WireMessage) -> Result<()>;
}
