//! Complaint lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a complaint.
///
/// Every change to a complaint's status appends exactly one
/// [`StatusChange`](super::history::StatusChange) entry; the two are written
/// in the same store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    /// Newly submitted, awaiting triage. The only state in which the owner
    /// may still edit the complaint.
    #[default]
    Pending,
    /// Picked up by staff.
    InProgress,
    /// Resolved to the submitter's benefit.
    Resolved,
    /// Rejected with a reason.
    Rejected,
    /// Closed; the complaint is no longer active.
    Closed,
}

impl ComplaintStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [ComplaintStatus; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::Resolved,
        Self::Rejected,
        Self::Closed,
    ];

    /// Return the status as a lowercase wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
            Self::Closed => "closed",
        }
    }

    /// Whether a transition to `target` follows the conventional lifecycle
    /// graph (pending → in_progress/rejected, in_progress →
    /// resolved/rejected/closed, resolved/rejected → closed).
    ///
    /// The live transition path does NOT enforce this graph — staff may jump
    /// a complaint between any two statuses — but departures from it are
    /// logged so irregular jumps stay visible in the audit trail.
    pub fn is_conventional_transition(&self, target: ComplaintStatus) -> bool {
        match self {
            Self::Pending => matches!(target, Self::InProgress | Self::Rejected),
            Self::InProgress => matches!(target, Self::Resolved | Self::Rejected | Self::Closed),
            Self::Resolved => matches!(target, Self::Closed),
            Self::Rejected => matches!(target, Self::Closed),
            Self::Closed => false,
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = casedesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "rejected" => Ok(Self::Rejected),
            "closed" => Ok(Self::Closed),
            _ => Err(casedesk_core::AppError::validation(format!(
                "Invalid status: '{s}'. Expected one of: pending, in_progress, resolved, rejected, closed"
            ))),
        }
    }
}
