//! Wire message definitions: inbound frames, control frames, and the event
//! envelope.

pub mod envelope;
pub mod types;

pub use envelope::EventEnvelope;
pub use types::{ControlMessage, InboundMessage};
