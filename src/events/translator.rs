//! # Status Event Translator
//!
//! Pure translation from a [`StatusChangeEvent`] to the [`WireMessage`]
//! handed to the resolved message sender. Performs no I/O and never fails
//! for missing optional data; the only precondition is a present
//! `new_status`, whose absence is signalled as "nothing to publish".
//!
//! Header keys, their casing, and the empty-string sentinel for an absent
//! old status are a compatibility surface for existing broker consumers.

use crate::constants::{
    headers, MESSAGE_ATTRIBUTE_STATE_CHANGE, MESSAGE_TYPE_BUILD_STATE_CHANGE,
};
use crate::events::status_event::StatusChangeEvent;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::json;

/// Insertion-ordered string-to-string header map.
///
/// Serializes as a JSON object whose key order matches insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageHeaders(Vec<(String, String)>);

impl MessageHeaders {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for MessageHeaders {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The header+body structure handed to the broker client for publication.
///
/// Constructed fresh per event, never mutated after construction, never
/// retained beyond the publish call.
#[derive(Debug, Clone, Serialize)]
pub struct WireMessage {
    pub headers: MessageHeaders,
    pub body: serde_json::Value,
}

/// Build the wire message for a status change, or `None` when the event
/// carries no `new_status` (the caller must skip the publish step).
pub fn translate(event: &StatusChangeEvent) -> Option<WireMessage> {
    let new_status = event.new_status?;
    let old_status = event.old_status_str();

    let mut hdrs = MessageHeaders::new();
    hdrs.insert(headers::TYPE, MESSAGE_TYPE_BUILD_STATE_CHANGE);
    hdrs.insert(headers::ATTRIBUTE, MESSAGE_ATTRIBUTE_STATE_CHANGE);
    hdrs.insert(headers::NAME, event.build.name.clone());
    hdrs.insert(headers::CONFIGURATION_ID, event.build.configuration_id.clone());
    hdrs.insert(headers::CONFIGURATION_REVISION, event.build.revision.to_string());
    hdrs.insert(headers::OLD_STATUS, old_status);
    hdrs.insert(headers::NEW_STATUS, new_status.as_str());

    let body = json!({
        "attribute": MESSAGE_ATTRIBUTE_STATE_CHANGE,
        "oldStatus": old_status,
        "newStatus": new_status.as_str(),
        "build": {
            "name": event.build.name,
            "configurationId": event.build.configuration_id,
            "revisionId": event.build.revision_id,
            "revision": event.build.revision,
        },
    });

    Some(WireMessage { headers: hdrs, body })
}
