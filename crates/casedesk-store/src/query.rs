//! Filter and sort types for complaint queries.

use serde::{Deserialize, Serialize};

use casedesk_core::types::UserId;
use casedesk_entity::complaint::{Complaint, ComplaintCategory, ComplaintPriority, ComplaintStatus};

/// Filter applied to complaint list queries.
///
/// All set fields must match. `search` is a case-insensitive substring match
/// over title, description, and the contact snapshot's name and email.
/// Soft-deleted documents are excluded unless `include_deleted` is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplaintFilter {
    /// Match on status.
    pub status: Option<ComplaintStatus>,
    /// Match on category.
    pub category: Option<ComplaintCategory>,
    /// Match on priority.
    pub priority: Option<ComplaintPriority>,
    /// Match on department (exact, case-insensitive).
    pub department: Option<String>,
    /// Match on the submitting user.
    pub user: Option<UserId>,
    /// Case-insensitive free-text search.
    pub search: Option<String>,
    /// Include soft-deleted documents.
    #[serde(default)]
    pub include_deleted: bool,
}

impl ComplaintFilter {
    /// An empty filter matching every live document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one submitting user.
    pub fn for_user(user: UserId) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    /// Restrict to one status.
    pub fn with_status(mut self, status: ComplaintStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Check whether a document matches this filter.
    pub fn matches(&self, complaint: &Complaint) -> bool {
        if !self.include_deleted && complaint.is_deleted {
            return false;
        }
        if let Some(status) = self.status {
            if complaint.status != status {
                return false;
            }
        }
        if let Some(category) = self.category {
            if complaint.category != category {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if complaint.priority != priority {
                return false;
            }
        }
        if let Some(department) = &self.department {
            if !complaint.department.eq_ignore_ascii_case(department) {
                return false;
            }
        }
        if let Some(user) = self.user {
            if complaint.user != user {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = complaint.title.to_lowercase().contains(&needle)
                || complaint.description.to_lowercase().contains(&needle)
                || complaint.contact.name.to_lowercase().contains(&needle)
                || complaint.contact.email.contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Field a complaint listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Creation time.
    #[default]
    CreatedAt,
    /// Last modification time.
    UpdatedAt,
    /// Priority level.
    Priority,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

/// Ordering applied to complaint list queries. Defaults to newest-first.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ComplaintSort {
    /// The field to order by.
    pub field: SortField,
    /// The direction.
    pub order: SortOrder,
}

impl ComplaintSort {
    /// Newest first (the listing default).
    pub fn newest_first() -> Self {
        Self::default()
    }

    /// Compare two documents under this ordering.
    pub fn compare(&self, a: &Complaint, b: &Complaint) -> std::cmp::Ordering {
        let ordering = match self.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortField::Priority => a.priority.cmp(&b.priority),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casedesk_entity::complaint::ContactInfo;

    fn complaint(title: &str) -> Complaint {
        Complaint::new(
            title,
            "A description long enough to pass validation.",
            ComplaintCategory::Billing,
            ComplaintPriority::Medium,
            "General",
            UserId::new(),
            ContactInfo::new("Asha Rao", "asha@example.com", None).unwrap(),
        )
    }

    #[test]
    fn test_filter_excludes_deleted_by_default() {
        let mut c = complaint("Deleted one here");
        c.mark_deleted(UserId::new());
        assert!(!ComplaintFilter::all().matches(&c));

        let mut include = ComplaintFilter::all();
        include.include_deleted = true;
        assert!(include.matches(&c));
    }

    #[test]
    fn test_search_matches_contact() {
        let c = complaint("Printer jam again");
        let mut filter = ComplaintFilter::all();
        filter.search = Some("ASHA".into());
        assert!(filter.matches(&c));
        filter.search = Some("nobody".into());
        assert!(!filter.matches(&c));
    }

    #[test]
    fn test_user_filter() {
        let c = complaint("Printer jam again");
        assert!(ComplaintFilter::for_user(c.user).matches(&c));
        assert!(!ComplaintFilter::for_user(UserId::new()).matches(&c));
    }
}
