//! # Notification Error Types
//!
//! Structured error handling for the notification subsystem using thiserror.
//!
//! The propagation policy is deliberately narrow: only [`NotifyError::Configuration`]
//! may abort anything, and only during startup sender resolution. Every other
//! variant is caught and logged at the dispatcher boundary so that a
//! notification failure can never fail the originating build.

use thiserror::Error;

/// Errors raised by the notification subsystem.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Configuration error: {component}: {message}")]
    Configuration { component: String, message: String },

    #[error("Callback already registered for build task {build_task_id}")]
    DuplicateCallback { build_task_id: i64 },

    #[error("Publish failed on sender '{sender}': {message}")]
    Publish { sender: String, message: String },

    #[error("Publish timed out on sender '{sender}' after {timeout_ms}ms")]
    Timeout { sender: String, timeout_ms: u64 },

    #[error("Message serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Sender '{sender}' used before initialization")]
    SenderNotInitialized { sender: String },
}

impl NotifyError {
    /// Shorthand for configuration errors, the only fatal variant.
    pub fn configuration(component: impl Into<String>, message: impl Into<String>) -> Self {
        NotifyError::Configuration {
            component: component.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NotifyError>;
