//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles recognized by complaint operations.
///
/// Status transitions, staff notes, and assignment are gated on
/// [`UserRole::is_staff`]; ownership alone never grants them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A regular end user submitting complaints.
    User,
    /// Support staff working complaints.
    Staff,
    /// Full administrator.
    Admin,
}

impl UserRole {
    /// Check whether this role carries staff privileges (staff or admin).
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Staff | Self::Admin)
    }

    /// Check whether this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Staff => "staff",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = casedesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "staff" => Ok(Self::Staff),
            "admin" => Ok(Self::Admin),
            _ => Err(casedesk_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: user, staff, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_check() {
        assert!(UserRole::Staff.is_staff());
        assert!(UserRole::Admin.is_staff());
        assert!(!UserRole::User.is_staff());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("STAFF".parse::<UserRole>().unwrap(), UserRole::Staff);
        assert!("manager".parse::<UserRole>().is_err());
    }
}
