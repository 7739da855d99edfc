//! The authenticated actor on whose behalf operations run.

use serde::{Deserialize, Serialize};

use casedesk_core::types::UserId;

use super::role::UserRole;

/// An already-authenticated identity, produced by the auth boundary.
///
/// Core operations never verify credentials themselves; they receive an
/// `Actor` and gate on its id and role. The optional profile fields exist
/// only to default the contact snapshot at complaint creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// The user's unique identifier.
    pub id: UserId,
    /// The user's role.
    pub role: UserRole,
    /// The user's email address.
    pub email: String,
    /// Display name from the user's profile, if known.
    pub name: Option<String>,
    /// Phone number from the user's profile, if known.
    pub phone: Option<String>,
}

impl Actor {
    /// Create an actor with the given id, role, and email.
    pub fn new(id: UserId, role: UserRole, email: impl Into<String>) -> Self {
        Self {
            id,
            role,
            email: email.into(),
            name: None,
            phone: None,
        }
    }

    /// Attach a profile display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a profile phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Check whether this actor carries staff privileges.
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}
