//! # System Constants
//!
//! Core constants and enums that define the notification subsystem's
//! compatibility surface: wire message header keys, fixed message type
//! identifiers, and the build status vocabulary.
//!
//! Header keys and message type strings are consumed by existing broker
//! subscribers; spelling and casing must be preserved exactly.

use serde::{Deserialize, Serialize};

/// Identifier of the built-in message sender, used as the resolution
/// fallback when multiple sender candidates are discovered.
pub const DEFAULT_SENDER_ID: &str = "DefaultMessageSender";

/// Topic the build status messages are published to unless overridden
/// by configuration.
pub const DEFAULT_TOPIC: &str = "build.status";

/// Fixed `type` header value identifying build state change messages.
pub const MESSAGE_TYPE_BUILD_STATE_CHANGE: &str = "BuildStateChange";

/// Fixed `attribute` header value for build state change messages.
pub const MESSAGE_ATTRIBUTE_STATE_CHANGE: &str = "state-change";

/// Wire message header keys, required on every published message.
pub mod headers {
    pub const TYPE: &str = "type";
    pub const ATTRIBUTE: &str = "attribute";
    pub const NAME: &str = "name";
    pub const CONFIGURATION_ID: &str = "configurationId";
    pub const CONFIGURATION_REVISION: &str = "configurationRevision";
    pub const OLD_STATUS: &str = "oldStatus";
    pub const NEW_STATUS: &str = "newStatus";
}

/// Build task lifecycle states as reported by the build coordinator.
///
/// The string form (also the serde form) is the wire-level spelling used
/// in message headers and bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatus {
    New,
    Enqueued,
    InProgress,
    Success,
    Failed,
    Cancelled,
    SystemError,
}

impl BuildStatus {
    /// Whether this status ends the build task's lifecycle. Terminal
    /// statuses are the point at which callers normally unregister their
    /// per-task callbacks.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BuildStatus::Success
                | BuildStatus::Failed
                | BuildStatus::Cancelled
                | BuildStatus::SystemError
        )
    }

    /// Wire-level spelling of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStatus::New => "NEW",
            BuildStatus::Enqueued => "ENQUEUED",
            BuildStatus::InProgress => "IN_PROGRESS",
            BuildStatus::Success => "SUCCESS",
            BuildStatus::Failed => "FAILED",
            BuildStatus::Cancelled => "CANCELLED",
            BuildStatus::SystemError => "SYSTEM_ERROR",
        }
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
