#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Build Notify
//!
//! Build status notification core for a build-orchestration platform.
//!
//! ## Overview
//!
//! When a build task's status changes, this crate resolves which message
//! sender carries the notification, translates the transition into a wire
//! message with a fixed header contract, and publishes it - while also
//! delivering the event synchronously to any in-process callback
//! registered for that build task.
//!
//! The subsystem is deliberately fire-and-forget: messaging may be wholly
//! disabled (zero discovered senders), publishes may time out or fail, and
//! subscriber callbacks may misbehave, without any of it ever failing the
//! originating build.
//!
//! ## Module Organization
//!
//! - [`events`] - Status change events, wire translation, and the dispatcher
//! - [`sender`] - Message sender capability, implementations, and resolution
//! - [`registry`] - Per-build-task callback registry
//! - [`config`] - Process-level notifier configuration
//! - [`constants`] - Header keys, message types, and the build status enum
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup and helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use build_notify::config::NotifierConfig;
//! use build_notify::constants::BuildStatus;
//! use build_notify::events::{BuildRef, NotificationDispatcher, StatusChangeEvent};
//! use build_notify::registry::CallbackRegistry;
//! use build_notify::sender::{resolve_sender, DefaultMessageSender, MessageSender};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NotifierConfig::from_env()?;
//!
//! // Candidates come from the host's discovery mechanism; resolution
//! // happens once at startup.
//! let candidates: Vec<Arc<dyn MessageSender>> =
//!     vec![Arc::new(DefaultMessageSender::new(config.channel_capacity))];
//! let resolved = resolve_sender(candidates, &config).await?;
//!
//! let dispatcher =
//!     NotificationDispatcher::new(Arc::new(CallbackRegistry::new()), resolved, &config);
//!
//! let event = StatusChangeEvent::new(
//!     7,
//!     Some(BuildStatus::InProgress),
//!     Some(BuildStatus::Success),
//!     BuildRef::new("foo", "42", "rev-1", 3),
//! );
//! dispatcher.dispatch(&event).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod logging;
pub mod registry;
pub mod sender;

pub use config::NotifierConfig;
pub use constants::{BuildStatus, DEFAULT_SENDER_ID};
pub use error::{NotifyError, Result};
pub use events::{BuildRef, NotificationDispatcher, StatusChangeEvent, WireMessage};
pub use registry::{CallbackRegistry, StatusCallback};
pub use sender::{resolve_sender, DefaultMessageSender, MessageSender, ResolvedSender};
