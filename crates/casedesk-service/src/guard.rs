//! Centralized ownership/authorization guard.
//!
//! Every per-complaint entry point evaluates this predicate before any
//! further logic or field validation. Bulk listings do not use it; they
//! scope the query to the actor instead of denying per item.

use casedesk_core::{AppError, AppResult};
use casedesk_entity::complaint::Complaint;
use casedesk_entity::user::Actor;

/// Whether the actor may read or mutate this complaint at all.
///
/// Staff and admins may always; everyone else only their own complaints.
pub fn can_access(complaint: &Complaint, actor: &Actor) -> bool {
    actor.is_staff() || complaint.is_owned_by(actor.id)
}

/// Fail with `Forbidden` unless [`can_access`] holds.
pub fn ensure_can_access(complaint: &Complaint, actor: &Actor) -> AppResult<()> {
    if can_access(complaint, actor) {
        Ok(())
    } else {
        Err(AppError::forbidden("Not authorized for this complaint"))
    }
}

/// Fail with `Forbidden` unless the actor holds a staff role.
///
/// Ownership alone never satisfies this check; status transitions and staff
/// fields are role-gated, not ownership-gated.
pub fn ensure_staff(actor: &Actor) -> AppResult<()> {
    if actor.is_staff() {
        Ok(())
    } else {
        Err(AppError::forbidden("Staff role required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casedesk_core::types::UserId;
    use casedesk_entity::complaint::{
        ComplaintCategory, ComplaintPriority, ContactInfo,
    };
    use casedesk_entity::user::UserRole;

    fn complaint(owner: UserId) -> Complaint {
        Complaint::new(
            "Broken AC in Room 301",
            "The air conditioning has not worked for three days straight.",
            ComplaintCategory::Other,
            ComplaintPriority::Medium,
            "General",
            owner,
            ContactInfo::new("Asha Rao", "asha@example.com", None).unwrap(),
        )
    }

    #[test]
    fn test_owner_can_access() {
        let owner = UserId::new();
        let c = complaint(owner);
        let actor = Actor::new(owner, UserRole::User, "asha@example.com");
        assert!(can_access(&c, &actor));
    }

    #[test]
    fn test_staff_can_access_any() {
        let c = complaint(UserId::new());
        let staff = Actor::new(UserId::new(), UserRole::Staff, "staff@example.com");
        let admin = Actor::new(UserId::new(), UserRole::Admin, "admin@example.com");
        assert!(can_access(&c, &staff));
        assert!(can_access(&c, &admin));
    }

    #[test]
    fn test_stranger_is_forbidden() {
        let c = complaint(UserId::new());
        let stranger = Actor::new(UserId::new(), UserRole::User, "other@example.com");
        assert!(!can_access(&c, &stranger));
        let err = ensure_can_access(&c, &stranger).unwrap_err();
        assert_eq!(err.kind, casedesk_core::error::ErrorKind::Forbidden);
    }

    #[test]
    fn test_ensure_staff_rejects_owner() {
        let owner = UserId::new();
        let actor = Actor::new(owner, UserRole::User, "asha@example.com");
        assert!(ensure_staff(&actor).is_err());
    }
}
