//! # Registry Infrastructure
//!
//! Associative stores consulted by the notification dispatcher.
//!
//! ## Available Registries
//!
//! - **CallbackRegistry**: per-build-task callback subscriptions for
//!   in-process, synchronous status delivery, independent of the broker
//!   publish path.

pub mod callback_registry;

pub use callback_registry::{CallbackEntry, CallbackRegistry, StatusCallback};
