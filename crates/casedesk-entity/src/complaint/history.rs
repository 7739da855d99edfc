//! Append-only status history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casedesk_core::types::UserId;

use super::status::ComplaintStatus;

/// Maximum transition note length in characters.
pub const MAX_TRANSITION_NOTE_LEN: usize = 500;

/// One entry in a complaint's status history.
///
/// The history sequence is append-only: entries are never edited or
/// reordered after insertion, and its length only grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    /// The status before the transition.
    pub previous_status: ComplaintStatus,
    /// The status after the transition.
    pub new_status: ComplaintStatus,
    /// The staff member who performed the transition.
    pub changed_by: UserId,
    /// Optional free-text note attached to the transition.
    pub note: Option<String>,
    /// When the transition happened. Immutable.
    pub changed_at: DateTime<Utc>,
}
