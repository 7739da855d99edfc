//! Bridge from `validator` errors into the unified error type.

use validator::Validate;

use casedesk_core::{AppError, AppResult};

/// Run derive-based validation and surface failures with field-level detail.
pub(crate) fn check<T: Validate>(value: &T) -> AppResult<()> {
    value.validate().map_err(|errors| {
        let mut parts: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{field}: {msg}"),
                    None => format!("{field}: {}", e.code),
                })
            })
            .collect();
        parts.sort();
        AppError::validation(parts.join("; "))
    })
}
