//! Comments embedded in a complaint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casedesk_core::types::{CommentId, UserId};

/// Maximum comment length in characters.
pub const MAX_COMMENT_LEN: usize = 500;

/// A comment on a complaint, authored by the owner or by staff.
///
/// Comments are immutable once created apart from the edit flag; they are
/// never deleted independently of the complaint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: CommentId,
    /// The comment author.
    pub user: UserId,
    /// Comment text, trimmed, 1-500 characters.
    pub text: String,
    /// Whether the author held a staff role at the time of writing.
    pub is_staff_comment: bool,
    /// Whether the comment has been edited.
    pub is_edited: bool,
    /// When the comment was last edited, if ever.
    pub edited_at: Option<DateTime<Utc>>,
    /// When the comment was created. Immutable.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment.
    pub fn new(user: UserId, text: impl Into<String>, is_staff_comment: bool) -> Self {
        Self {
            id: CommentId::new(),
            user,
            text: text.into(),
            is_staff_comment,
            is_edited: false,
            edited_at: None,
            created_at: Utc::now(),
        }
    }
}
