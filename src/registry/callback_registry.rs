//! # Callback Registry
//!
//! Associates a caller-supplied consumer function with a build-task
//! identifier for in-process delivery of that task's status changes,
//! whether or not broker messaging is enabled.
//!
//! ## Concurrency
//!
//! Backed by a sharded concurrent map (dashmap), so register, unregister
//! and lookup from concurrent dispatch calls do not serialize unrelated
//! build tasks. Lookups clone the entry out of the map; invocation never
//! happens under a shard lock, and an in-flight invoke keeps working on
//! the snapshot it found even if the registration changes underneath it.
//!
//! ## Policy
//!
//! At most one callback per build task. A second registration for the
//! same identifier is rejected; callers unregister explicitly, normally
//! once they observe a terminal status.

use crate::error::{NotifyError, Result};
use crate::events::status_event::StatusChangeEvent;
use crate::logging::log_registry_operation;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Consumer function invoked synchronously with each status change of the
/// build task it is registered for.
pub type StatusCallback =
    Arc<dyn Fn(&StatusChangeEvent) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> + Send + Sync>;

/// A registered per-task subscription.
#[derive(Clone)]
pub struct CallbackEntry {
    pub build_task_id: i64,
    pub callback: StatusCallback,
    pub registered_at: chrono::DateTime<chrono::Utc>,
}

impl std::fmt::Debug for CallbackEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackEntry")
            .field("build_task_id", &self.build_task_id)
            .field("callback", &"<StatusCallback>")
            .field("registered_at", &self.registered_at)
            .finish()
    }
}

/// Concurrent map of build-task id to callback subscription.
#[derive(Default)]
pub struct CallbackRegistry {
    entries: DashMap<i64, CallbackEntry>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for a build task. Fails when one is already
    /// registered for the same identifier.
    pub fn register(&self, build_task_id: i64, callback: StatusCallback) -> Result<()> {
        match self.entries.entry(build_task_id) {
            Entry::Occupied(_) => {
                log_registry_operation(
                    "register",
                    build_task_id,
                    "rejected",
                    Some("duplicate registration"),
                );
                Err(NotifyError::DuplicateCallback { build_task_id })
            }
            Entry::Vacant(vacant) => {
                vacant.insert(CallbackEntry {
                    build_task_id,
                    callback,
                    registered_at: chrono::Utc::now(),
                });
                debug!(build_task_id, "Registered status callback");
                Ok(())
            }
        }
    }

    /// Remove the callback for a build task. Absence is not an error.
    pub fn unregister(&self, build_task_id: i64) {
        if self.entries.remove(&build_task_id).is_some() {
            debug!(build_task_id, "Unregistered status callback");
        }
    }

    /// Snapshot the entry for a build task without removing it.
    pub fn lookup(&self, build_task_id: i64) -> Option<CallbackEntry> {
        self.entries
            .get(&build_task_id)
            .map(|entry| entry.value().clone())
    }

    /// Number of currently registered callbacks.
    pub fn registered_count(&self) -> usize {
        self.entries.len()
    }
}
