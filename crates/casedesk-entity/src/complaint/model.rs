//! The complaint aggregate root.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casedesk_core::traits::storage::StoredUpload;
use casedesk_core::types::{AttachmentId, ComplaintId, UserId};
use casedesk_core::{AppError, AppResult};

use super::attachment::{Attachment, MAX_ATTACHMENTS, MAX_ATTACHMENT_SIZE_BYTES};
use super::category::ComplaintCategory;
use super::comment::{Comment, MAX_COMMENT_LEN};
use super::contact::ContactInfo;
use super::history::{StatusChange, MAX_TRANSITION_NOTE_LEN};
use super::priority::ComplaintPriority;
use super::status::ComplaintStatus;

/// Minimum title length.
pub const TITLE_MIN: usize = 5;
/// Maximum title length.
pub const TITLE_MAX: usize = 200;
/// Minimum description length.
pub const DESCRIPTION_MIN: usize = 10;
/// Maximum description length.
pub const DESCRIPTION_MAX: usize = 2000;
/// Maximum department name length.
pub const DEPARTMENT_MAX: usize = 100;
/// Maximum staff notes length.
pub const NOTES_MAX: usize = 1000;

/// A submitted grievance and its full lifecycle.
///
/// Stored and retrieved as a whole document: comments, attachments, and
/// status history are embedded, not separate collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    /// Unique complaint identifier. Immutable once created.
    pub id: ComplaintId,
    /// Short summary, 5-200 characters.
    pub title: String,
    /// Full description, 10-2000 characters.
    pub description: String,
    /// Classification.
    pub category: ComplaintCategory,
    /// Owning department, free text.
    pub department: String,
    /// Lifecycle status.
    pub status: ComplaintStatus,
    /// Urgency.
    pub priority: ComplaintPriority,
    /// Staff-only working notes.
    pub notes: Option<String>,
    /// The submitting user. Immutable.
    pub user: UserId,
    /// Contact snapshot captured at creation.
    pub contact: ContactInfo,
    /// Uploaded file metadata, at most [`MAX_ATTACHMENTS`] entries.
    pub attachments: Vec<Attachment>,
    /// Discussion thread.
    pub comments: Vec<Comment>,
    /// Staff member the complaint is assigned to.
    pub assigned_to: Option<UserId>,
    /// When the complaint was assigned.
    pub assigned_at: Option<DateTime<Utc>>,
    /// Append-only transition log.
    pub status_history: Vec<StatusChange>,
    /// Cleared when the complaint is closed or soft-deleted.
    pub is_active: bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the complaint was soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Who soft-deleted the complaint.
    pub deleted_by: Option<UserId>,
    /// Set by the transition to `resolved`.
    pub resolved_at: Option<DateTime<Utc>>,
    /// Who resolved the complaint.
    pub resolved_by: Option<UserId>,
    /// Optional resolution summary.
    pub resolution_note: Option<String>,
    /// Set by the transition to `rejected`.
    pub rejected_at: Option<DateTime<Utc>>,
    /// Who rejected the complaint.
    pub rejected_by: Option<UserId>,
    /// Why the complaint was rejected.
    pub rejection_reason: Option<String>,
    /// When the complaint was created.
    pub created_at: DateTime<Utc>,
    /// When the complaint was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Complaint {
    /// Create a new pending complaint with empty sub-collections.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: ComplaintCategory,
        priority: ComplaintPriority,
        department: impl Into<String>,
        user: UserId,
        contact: ContactInfo,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ComplaintId::new(),
            title: title.into(),
            description: description.into(),
            category,
            department: department.into(),
            status: ComplaintStatus::Pending,
            priority,
            notes: None,
            user,
            contact,
            attachments: Vec::new(),
            comments: Vec::new(),
            assigned_to: None,
            assigned_at: None,
            status_history: Vec::new(),
            is_active: true,
            is_deleted: false,
            deleted_at: None,
            deleted_by: None,
            resolved_at: None,
            resolved_by: None,
            resolution_note: None,
            rejected_at: None,
            rejected_by: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the given user created this complaint.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user == user_id
    }

    /// Whether the owner may still edit title/description/category/priority.
    pub fn is_owner_editable(&self) -> bool {
        self.status == ComplaintStatus::Pending
    }

    /// Perform a status transition and its side effects.
    ///
    /// This is the single place transition side effects are defined: the
    /// history entry, the resolution/rejection stamps, and the active flag
    /// all happen here, so a new status-dependent field cannot be forgotten
    /// at one call site and handled at another. Exactly one history entry is
    /// appended per successful call; a failed call leaves the aggregate
    /// untouched. Transitions are not deduplicated: re-targeting the current
    /// status appends another entry.
    pub fn apply_transition(
        &mut self,
        new_status: ComplaintStatus,
        changed_by: UserId,
        note: Option<String>,
    ) -> AppResult<StatusChange> {
        let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        if let Some(n) = &note {
            if n.len() > MAX_TRANSITION_NOTE_LEN {
                return Err(AppError::validation(format!(
                    "Note cannot exceed {MAX_TRANSITION_NOTE_LEN} characters"
                )));
            }
        }

        let now = Utc::now();
        let previous_status = self.status;
        self.status = new_status;

        let entry = StatusChange {
            previous_status,
            new_status,
            changed_by,
            note: note.clone(),
            changed_at: now,
        };
        self.status_history.push(entry.clone());

        match new_status {
            ComplaintStatus::Resolved => {
                self.resolved_at = Some(now);
                self.resolved_by = Some(changed_by);
            }
            ComplaintStatus::Rejected => {
                self.rejected_at = Some(now);
                self.rejected_by = Some(changed_by);
                self.rejection_reason = note.or_else(|| self.rejection_reason.take());
            }
            ComplaintStatus::Closed => {
                self.is_active = false;
            }
            ComplaintStatus::Pending | ComplaintStatus::InProgress => {}
        }

        self.updated_at = now;
        Ok(entry)
    }

    /// Append a comment, returning the created entry.
    pub fn add_comment(
        &mut self,
        user: UserId,
        text: &str,
        is_staff_comment: bool,
    ) -> AppResult<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::validation("Comment text is required"));
        }
        if text.len() > MAX_COMMENT_LEN {
            return Err(AppError::validation(format!(
                "Comment cannot exceed {MAX_COMMENT_LEN} characters"
            )));
        }

        let comment = Comment::new(user, text, is_staff_comment);
        self.comments.push(comment.clone());
        self.updated_at = Utc::now();
        Ok(comment)
    }

    /// Record stored-upload metadata as a new attachment.
    ///
    /// The 11th entry and oversized files are rejected, leaving the
    /// aggregate unchanged.
    pub fn add_attachment(&mut self, upload: StoredUpload) -> AppResult<Attachment> {
        if self.attachments.len() >= MAX_ATTACHMENTS {
            return Err(AppError::validation(format!(
                "Cannot have more than {MAX_ATTACHMENTS} attachments per complaint"
            )));
        }
        if upload.size_bytes > MAX_ATTACHMENT_SIZE_BYTES {
            return Err(AppError::validation("File size cannot exceed 10MB"));
        }

        let attachment = Attachment::from_upload(upload);
        self.attachments.push(attachment.clone());
        self.updated_at = Utc::now();
        Ok(attachment)
    }

    /// Look up an attachment by id.
    pub fn attachment(&self, id: AttachmentId) -> Option<&Attachment> {
        self.attachments.iter().find(|a| a.id == id)
    }

    /// Remove an attachment entry by id, returning it if present.
    pub fn remove_attachment(&mut self, id: AttachmentId) -> Option<Attachment> {
        let idx = self.attachments.iter().position(|a| a.id == id)?;
        self.updated_at = Utc::now();
        Some(self.attachments.remove(idx))
    }

    /// Mark the complaint soft-deleted, preserving the record for audit.
    pub fn mark_deleted(&mut self, by: UserId) {
        let now = Utc::now();
        self.is_deleted = true;
        self.is_active = false;
        self.deleted_at = Some(now);
        self.deleted_by = Some(by);
        self.updated_at = now;
    }

    /// Bump the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
