//! # casedesk-realtime
//!
//! Real-time fan-out engine for CaseDesk. Provides:
//!
//! - a concurrency-safe registry of live connections
//! - best-effort, at-most-once-per-connection event broadcast with
//!   channel filtering (no replay, no durable queue)
//! - single-channel subscriptions (last subscription wins)
//! - a heartbeat sweep that terminates unresponsive connections
//! - optional per-connection identity for targeted delivery
//!
//! The hub sits atop a message-framed connection abstraction: transports
//! hand inbound text frames to [`BroadcastHub::handle_inbound`] and drain
//! outbound frames from the receiver returned at registration. It does not
//! depend on any particular WebSocket library.

pub mod connection;
pub mod hub;
pub mod message;

pub use connection::handle::{ConnectionHandle, ConnectionId};
pub use connection::identity::{ConnectionIdentity, IdentityVerifier};
pub use hub::BroadcastHub;
pub use message::envelope::EventEnvelope;
