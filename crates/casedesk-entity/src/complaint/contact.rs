//! Contact snapshot captured at complaint creation.

use serde::{Deserialize, Serialize};

use casedesk_core::{AppError, AppResult};

/// Minimum contact name length.
const NAME_MIN: usize = 2;
/// Maximum contact name length.
const NAME_MAX: usize = 100;

/// Contact details captured when a complaint is submitted.
///
/// This is a snapshot, not a reference: later edits to the submitting user's
/// profile must not retroactively alter historical contact information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Contact display name.
    pub name: String,
    /// Contact email address (stored lowercased).
    pub email: String,
    /// Optional 10-digit phone number.
    pub phone: Option<String>,
}

impl ContactInfo {
    /// Build a validated, normalized contact snapshot.
    ///
    /// Trims all fields, lowercases the email, and drops an empty phone.
    pub fn new(name: &str, email: &str, phone: Option<&str>) -> AppResult<Self> {
        let name = name.trim();
        let email = email.trim().to_lowercase();
        let phone = phone.map(str::trim).filter(|p| !p.is_empty());

        if name.is_empty() || email.is_empty() {
            return Err(AppError::validation("Contact name and email are required"));
        }
        if name.len() < NAME_MIN || name.len() > NAME_MAX {
            return Err(AppError::validation(format!(
                "Contact name must be between {NAME_MIN} and {NAME_MAX} characters"
            )));
        }
        if !is_valid_email(&email) {
            return Err(AppError::validation("Please provide a valid email"));
        }
        if let Some(p) = phone {
            if !is_valid_phone(p) {
                return Err(AppError::validation(
                    "Please provide a valid 10-digit phone number",
                ));
            }
        }

        Ok(Self {
            name: name.to_string(),
            email,
            phone: phone.map(str::to_string),
        })
    }
}

/// Local-part `@` domain with a dot, no whitespace anywhere.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && !domain.contains('@') && domain.contains('.')
}

/// Exactly ten ASCII digits, leading digit 6-9.
fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10
        && phone.chars().all(|c| c.is_ascii_digit())
        && matches!(phone.as_bytes()[0], b'6'..=b'9')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_email() {
        let contact = ContactInfo::new("  Asha Rao ", " Asha@Example.COM ", None).unwrap();
        assert_eq!(contact.name, "Asha Rao");
        assert_eq!(contact.email, "asha@example.com");
        assert_eq!(contact.phone, None);
    }

    #[test]
    fn test_rejects_missing_fields() {
        assert!(ContactInfo::new("", "a@b.com", None).is_err());
        assert!(ContactInfo::new("Asha", "   ", None).is_err());
    }

    #[test]
    fn test_rejects_bad_email() {
        assert!(ContactInfo::new("Asha", "not-an-email", None).is_err());
        assert!(ContactInfo::new("Asha", "a b@c.com", None).is_err());
        assert!(ContactInfo::new("Asha", "a@nodot", None).is_err());
    }

    #[test]
    fn test_phone_rules() {
        assert!(ContactInfo::new("Asha", "a@b.com", Some("9876543210")).is_ok());
        assert!(ContactInfo::new("Asha", "a@b.com", Some("1234567890")).is_err());
        assert!(ContactInfo::new("Asha", "a@b.com", Some("98765")).is_err());
        // empty phone is treated as absent
        let contact = ContactInfo::new("Asha", "a@b.com", Some("  ")).unwrap();
        assert_eq!(contact.phone, None);
    }
}
