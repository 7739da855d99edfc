//! Complaint category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintCategory {
    /// Technical issues.
    Technical,
    /// Billing disputes.
    Billing,
    /// Service quality.
    Service,
    /// Product defects.
    Product,
    /// Harassment reports.
    Harassment,
    /// Safety concerns.
    Safety,
    /// Anything else.
    #[default]
    Other,
}

impl ComplaintCategory {
    /// Return the category as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Billing => "billing",
            Self::Service => "service",
            Self::Product => "product",
            Self::Harassment => "harassment",
            Self::Safety => "safety",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ComplaintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ComplaintCategory {
    type Err = casedesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "technical" => Ok(Self::Technical),
            "billing" => Ok(Self::Billing),
            "service" => Ok(Self::Service),
            "product" => Ok(Self::Product),
            "harassment" => Ok(Self::Harassment),
            "safety" => Ok(Self::Safety),
            "other" => Ok(Self::Other),
            _ => Err(casedesk_core::AppError::validation(format!(
                "'{s}' is not a valid category"
            ))),
        }
    }
}
