//! Common validation utilities for listing and booking payloads.

use chrono::NaiveDate;
use validator::ValidationError;

/// Validates an availability window: `from` must not come after `to`.
///
/// Availability bounds are inclusive dates, unlike booking windows which are
/// half-open.
pub fn validate_availability_window(from: NaiveDate, to: NaiveDate) -> Result<(), ValidationError> {
    if from <= to {
        Ok(())
    } else {
        let mut err = ValidationError::new("availability_window");
        err.message = Some("available_from must not be after available_to".into());
        Err(err)
    }
}

/// Validates that a string is non-blank after trimming.
pub fn validate_non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}
