//! # Event System
//!
//! Build status change events, their translation to wire messages, and the
//! dispatcher that fans each transition out to the per-task callback and
//! the resolved message sender.

pub mod dispatcher;
pub mod status_event;
pub mod translator;

// Re-export key types for convenience
pub use dispatcher::NotificationDispatcher;
pub use status_event::{BuildRef, StatusChangeEvent};
pub use translator::{translate, MessageHeaders, WireMessage};
