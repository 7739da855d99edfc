//! Request payloads for complaint mutations.

use serde::{Deserialize, Serialize};
use validator::Validate;

use casedesk_core::types::UserId;
use casedesk_entity::complaint::{ComplaintCategory, ComplaintPriority, ComplaintStatus};

/// Contact details supplied with a complaint submission.
///
/// When absent, the snapshot is defaulted from the actor's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactPayload {
    /// Contact display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Payload for creating a complaint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateComplaintRequest {
    /// Short summary.
    #[validate(length(min = 5, max = 200, message = "Title must be between 5 and 200 characters"))]
    pub title: String,
    /// Full description.
    #[validate(length(
        min = 10,
        max = 2000,
        message = "Description must be between 10 and 2000 characters"
    ))]
    pub description: String,
    /// Classification; defaults to `other`.
    #[serde(default)]
    pub category: Option<ComplaintCategory>,
    /// Urgency; defaults to `medium`.
    #[serde(default)]
    pub priority: Option<ComplaintPriority>,
    /// Owning department; defaults to `"General"`.
    #[validate(length(max = 100, message = "Department name cannot exceed 100 characters"))]
    #[serde(default)]
    pub department: Option<String>,
    /// Contact snapshot; defaults from the actor's profile.
    #[serde(default)]
    pub contact: Option<ContactPayload>,
}

impl CreateComplaintRequest {
    /// Return a copy with all free-text fields trimmed.
    ///
    /// Validation runs on the trimmed values, so an all-whitespace title
    /// fails the same way a missing one does.
    pub fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category,
            priority: self.priority,
            department: self
                .department
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            contact: self.contact.clone(),
        }
    }
}

/// Payload for updating a complaint.
///
/// Owners may set title/description/category/priority while the complaint is
/// still pending; notes, assignment, and status are staff-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateComplaintRequest {
    /// New title.
    #[validate(length(min = 5, max = 200, message = "Title must be between 5 and 200 characters"))]
    pub title: Option<String>,
    /// New description.
    #[validate(length(
        min = 10,
        max = 2000,
        message = "Description must be between 10 and 2000 characters"
    ))]
    pub description: Option<String>,
    /// New classification.
    pub category: Option<ComplaintCategory>,
    /// New urgency.
    pub priority: Option<ComplaintPriority>,
    /// Staff working notes.
    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,
    /// Staff member to assign the complaint to.
    pub assigned_to: Option<UserId>,
    /// Target status; triggers a full status transition.
    pub status: Option<ComplaintStatus>,
    /// Note recorded with the status transition.
    #[validate(length(max = 500, message = "Note cannot exceed 500 characters"))]
    pub status_note: Option<String>,
}

impl UpdateComplaintRequest {
    /// Whether any staff-only field is present.
    pub fn has_staff_fields(&self) -> bool {
        self.notes.is_some()
            || self.assigned_to.is_some()
            || self.status.is_some()
            || self.status_note.is_some()
    }

    /// Return a copy with all free-text fields trimmed.
    pub fn normalized(&self) -> Self {
        Self {
            title: self.title.as_deref().map(str::trim).map(str::to_string),
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .map(str::to_string),
            category: self.category,
            priority: self.priority,
            notes: self.notes.as_deref().map(str::trim).map(str::to_string),
            assigned_to: self.assigned_to,
            status: self.status,
            status_note: self
                .status_note
                .as_deref()
                .map(str::trim)
                .map(str::to_string),
        }
    }
}
