//! Broadcast event kinds emitted by complaint operations.
//!
//! The wire names are a stable contract: connected clients dispatch on the
//! `type` field of the event envelope, so renaming a variant here is a
//! breaking protocol change.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Event kinds fanned out to live connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintEventKind {
    /// A complaint was created. Payload: the full complaint snapshot.
    #[serde(rename = "NEW_COMPLAINT")]
    NewComplaint,
    /// A complaint was updated. Payload: the full complaint snapshot,
    /// optionally flagged `statusChanged` when a status transition occurred.
    #[serde(rename = "UPDATED_COMPLAINT")]
    UpdatedComplaint,
    /// A complaint was deleted. Payload: just the complaint id.
    #[serde(rename = "DELETED_COMPLAINT")]
    DeletedComplaint,
    /// A comment was added. Payload: `{ complaintId, comment }`.
    #[serde(rename = "NEW_COMMENT")]
    NewComment,
}

impl ComplaintEventKind {
    /// Return the wire name of this event kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewComplaint => "NEW_COMPLAINT",
            Self::UpdatedComplaint => "UPDATED_COMPLAINT",
            Self::DeletedComplaint => "DELETED_COMPLAINT",
            Self::NewComment => "NEW_COMMENT",
        }
    }
}

impl fmt::Display for ComplaintEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&ComplaintEventKind::NewComplaint).expect("serialize");
        assert_eq!(json, "\"NEW_COMPLAINT\"");
        let parsed: ComplaintEventKind =
            serde_json::from_str("\"UPDATED_COMPLAINT\"").expect("deserialize");
        assert_eq!(parsed, ComplaintEventKind::UpdatedComplaint);
    }
}
