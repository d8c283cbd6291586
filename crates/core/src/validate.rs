//! Input validation shared by the phase workflow endpoints.
//!
//! Every check here runs before any network or database write, so a
//! rejected input never mutates state.

use crate::error::CoreError;
use crate::types::Date;

/// Hours logged against a phase in one entry: strictly positive, at most a
/// full day.
pub fn validate_logged_hours(hours: f64) -> Result<(), CoreError> {
    if !hours.is_finite() || hours <= 0.0 || hours > 24.0 {
        return Err(CoreError::Validation(format!(
            "Hours must be greater than 0 and at most 24 (got {hours})"
        )));
    }
    Ok(())
}

/// Phase completion percentage: 0 through 100 inclusive.
pub fn validate_completion(completion: i16) -> Result<(), CoreError> {
    if !(0..=100).contains(&completion) {
        return Err(CoreError::Validation(format!(
            "Completion must be between 0 and 100 (got {completion})"
        )));
    }
    Ok(())
}

/// A project's start date must not fall after its deadline. Either side may
/// be absent while a project is still a draft.
pub fn validate_date_range(start_date: Option<Date>, deadline: Option<Date>) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (start_date, deadline) {
        if start > end {
            return Err(CoreError::Validation(
                "Deadline must be on or after the start date".to_string(),
            ));
        }
    }
    Ok(())
}

/// Comments must carry visible text.
pub fn validate_comment_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation("Comment text is required".to_string()));
    }
    Ok(())
}
