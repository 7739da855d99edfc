//! The event envelope fanned out to subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casedesk_core::events::ComplaintEventKind;

/// Wire envelope for domain events: `{ type, data, timestamp }`.
///
/// This shape is a stable contract; connected clients dispatch on `type`
/// and read `data` as a full snapshot object (deletion carries only an id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// The event kind (SCREAMING_CASE wire name).
    #[serde(rename = "type")]
    pub event_type: ComplaintEventKind,
    /// The event payload.
    pub data: serde_json::Value,
    /// When the event was emitted, RFC 3339.
    pub timestamp: DateTime<Utc>,
}

impl EventEnvelope {
    /// Wrap an event payload, stamped with the current time.
    pub fn new(event_type: ComplaintEventKind, data: serde_json::Value) -> Self {
        Self {
            event_type,
            data,
            timestamp: Utc::now(),
        }
    }

    /// Serialize to a text frame.
    pub fn to_frame(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_wire_shape() {
        let envelope = EventEnvelope::new(
            ComplaintEventKind::NewComplaint,
            serde_json::json!({ "id": "abc" }),
        );
        let value: serde_json::Value = serde_json::from_str(&envelope.to_frame()).unwrap();

        assert_eq!(value["type"], "NEW_COMPLAINT");
        assert_eq!(value["data"]["id"], "abc");
        // RFC 3339 timestamp
        assert!(value["timestamp"].as_str().unwrap().contains('T'));
    }
}
