//! Real-time broadcast hub configuration.

use serde::{Deserialize, Serialize};

/// Broadcast hub (WebSocket) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Internal per-connection outbound buffer size.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Heartbeat ping interval in seconds. A connection that has not
    /// answered the previous ping by the next sweep is terminated.
    #[serde(default = "default_ping_interval")]
    pub ping_interval_seconds: u64,
    /// Default channel clients are subscribed to when a subscribe frame
    /// names none.
    #[serde(default = "default_channel")]
    pub default_channel: String,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
            ping_interval_seconds: default_ping_interval(),
            default_channel: default_channel(),
        }
    }
}

fn default_channel_buffer() -> usize {
    256
}

fn default_ping_interval() -> u64 {
    30
}

fn default_channel() -> String {
    "complaints".to_string()
}
