//! # Status Change Events
//!
//! The input record of the notification subsystem: one immutable
//! [`StatusChangeEvent`] per observed build-task status transition,
//! produced by the build-status owner and discarded after dispatch.

use crate::constants::BuildStatus;
use serde::{Deserialize, Serialize};

/// Descriptive metadata of the build whose status changed.
///
/// Carried verbatim into the wire message; this subsystem never mutates
/// or persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRef {
    /// Human-readable build name
    pub name: String,
    /// Identifier of the build configuration
    pub configuration_id: String,
    /// Identifier of the configuration revision this build ran against
    pub revision_id: String,
    /// Revision number of the configuration
    pub revision: i32,
}

impl BuildRef {
    pub fn new(
        name: impl Into<String>,
        configuration_id: impl Into<String>,
        revision_id: impl Into<String>,
        revision: i32,
    ) -> Self {
        Self {
            name: name.into(),
            configuration_id: configuration_id.into(),
            revision_id: revision_id.into(),
            revision,
        }
    }
}

/// Immutable record of a single build-task status transition.
///
/// Either status may be absent: upstream emits events before an initial
/// status exists (`old_status` absent) and may emit metadata-only updates
/// (`new_status` absent). An absent `new_status` suppresses broker publish
/// but not callback delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChangeEvent {
    /// Opaque identifier of the build task this transition belongs to
    pub build_task_id: i64,
    pub old_status: Option<BuildStatus>,
    pub new_status: Option<BuildStatus>,
    pub build: BuildRef,
}

impl StatusChangeEvent {
    pub fn new(
        build_task_id: i64,
        old_status: Option<BuildStatus>,
        new_status: Option<BuildStatus>,
        build: BuildRef,
    ) -> Self {
        Self {
            build_task_id,
            old_status,
            new_status,
            build,
        }
    }

    /// Wire-level string of the old status, empty when absent.
    pub fn old_status_str(&self) -> &'static str {
        self.old_status.map(|s| s.as_str()).unwrap_or("")
    }
}
