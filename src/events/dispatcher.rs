//! # Notification Dispatcher
//!
//! The single entry point of the notification subsystem, invoked once per
//! observed build-task status transition, concurrently from many tasks.
//!
//! Per call: deliver the event to the task's registered callback (if any),
//! then translate and publish it through the process-wide resolved sender
//! (if any). Fire-and-forget: callback failures, publish failures and
//! timeouts are logged and swallowed so that a notification problem can
//! never fail or retry the originating build-status transition.

use crate::config::NotifierConfig;
use crate::events::status_event::StatusChangeEvent;
use crate::events::translator::translate;
use crate::logging::{log_dispatch_operation, log_error};
use crate::registry::CallbackRegistry;
use crate::sender::ResolvedSender;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct NotificationDispatcher {
    registry: Arc<CallbackRegistry>,
    sender: ResolvedSender,
    topic: String,
    publish_timeout: Duration,
}

impl NotificationDispatcher {
    pub fn new(
        registry: Arc<CallbackRegistry>,
        sender: ResolvedSender,
        config: &NotifierConfig,
    ) -> Self {
        Self {
            registry,
            sender,
            topic: config.topic.clone(),
            publish_timeout: Duration::from_millis(config.publish_timeout_ms),
        }
    }

    /// The callback registry this dispatcher consults, for callers that
    /// subscribe to individual build tasks.
    pub fn callback_registry(&self) -> &Arc<CallbackRegistry> {
        &self.registry
    }

    /// Handle one status transition. Never fails; all delivery problems
    /// are logged and dropped here.
    pub async fn dispatch(&self, event: &StatusChangeEvent) {
        self.deliver_callback(event);

        // Messaging disabled is the normal degraded mode, not an error
        let Some(sender) = self.sender.get() else {
            return;
        };

        // An absent new status means there is nothing to publish
        let Some(message) = translate(event) else {
            debug!(
                build_task_id = event.build_task_id,
                "Skipping publish: status change carries no new status"
            );
            return;
        };

        let publish = sender.send_to_topic(&self.topic, &message);
        match tokio::time::timeout(self.publish_timeout, publish).await {
            Ok(Ok(())) => {
                log_dispatch_operation(
                    "publish",
                    event.build_task_id,
                    event.old_status.map(|s| s.as_str()),
                    event.new_status.map(|s| s.as_str()),
                    "published",
                    Some(sender.name()),
                );
            }
            Ok(Err(e)) => {
                log_error(
                    "NotificationDispatcher",
                    "publish",
                    &e.to_string(),
                    Some(&format!("build_task_id={}", event.build_task_id)),
                );
            }
            Err(_elapsed) => {
                log_error(
                    "NotificationDispatcher",
                    "publish",
                    &format!(
                        "publish timed out after {}ms on sender '{}'",
                        self.publish_timeout.as_millis(),
                        sender.name()
                    ),
                    Some(&format!("build_task_id={}", event.build_task_id)),
                );
            }
        }
    }

    /// Invoke the per-task callback, if one is registered, on a snapshot of
    /// the entry. A misbehaving subscriber (error return or panic) is
    /// logged and must never block the broker-publish path.
    fn deliver_callback(&self, event: &StatusChangeEvent) {
        let Some(entry) = self.registry.lookup(event.build_task_id) else {
            return;
        };

        let outcome = catch_unwind(AssertUnwindSafe(|| (entry.callback)(event)));
        match outcome {
            Ok(Ok(())) => {
                log_dispatch_operation(
                    "callback",
                    event.build_task_id,
                    event.old_status.map(|s| s.as_str()),
                    event.new_status.map(|s| s.as_str()),
                    "delivered",
                    None,
                );
            }
            Ok(Err(e)) => {
                log_error(
                    "NotificationDispatcher",
                    "callback",
                    &e.to_string(),
                    Some(&format!("build_task_id={}", event.build_task_id)),
                );
            }
            Err(_panic) => {
                log_error(
                    "NotificationDispatcher",
                    "callback",
                    "callback panicked",
                    Some(&format!("build_task_id={}", event.build_task_id)),
                );
            }
        }
    }
}
