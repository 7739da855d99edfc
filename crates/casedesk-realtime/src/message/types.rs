//! Inbound and outbound control frame definitions.

use serde::{Deserialize, Serialize};

/// Frames sent by the client to the hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Client-initiated keepalive; answered with a pong frame.
    Ping,
    /// Answer to a server ping (transports that surface protocol-level
    /// pongs natively call [`record_pong`](crate::BroadcastHub::record_pong)
    /// instead).
    Pong,
    /// Subscribe to a channel. Replaces any previous subscription.
    Subscribe {
        /// Channel name; the configured default when omitted.
        channel: Option<String>,
    },
    /// Clear the active subscription.
    Unsubscribe,
}

/// Control frames sent by the hub to a single client.
///
/// Domain events use [`EventEnvelope`](super::envelope::EventEnvelope)
/// instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlMessage {
    /// Welcome frame sent on registration.
    Connection {
        /// Human-readable greeting.
        message: String,
        /// Server time, RFC 3339.
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// Subscription acknowledgment.
    Subscribed {
        /// The now-active channel.
        channel: String,
        /// Human-readable confirmation.
        message: String,
    },
    /// Answer to a client ping.
    Pong {
        /// Server time in epoch milliseconds.
        timestamp: i64,
    },
    /// Server keepalive; the client must answer with a pong frame.
    Ping {
        /// Server time in epoch milliseconds.
        timestamp: i64,
    },
}

impl ControlMessage {
    /// Serialize to a text frame.
    pub fn to_frame(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_subscribe_parses_with_and_without_channel() {
        let msg: InboundMessage =
            serde_json::from_str(r#"{"type":"subscribe","channel":"complaints"}"#).unwrap();
        assert!(matches!(msg, InboundMessage::Subscribe { channel: Some(c) } if c == "complaints"));

        let msg: InboundMessage = serde_json::from_str(r#"{"type":"subscribe"}"#).unwrap();
        assert!(matches!(msg, InboundMessage::Subscribe { channel: None }));
    }

    #[test]
    fn test_control_frame_tags() {
        let frame = ControlMessage::Pong { timestamp: 1 }.to_frame();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["type"], "pong");
    }
}
