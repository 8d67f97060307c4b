//! Field-level checks shared by the request models.
//!
//! Each helper returns the first violation as `AppError::Validation`, so a
//! request is rejected with a single human-readable message.

use validator::ValidateEmail;

use crate::core::{AppError, Result};

/// Required text: trimmed, non-empty, at most `max` characters
pub fn required_text(label: &str, value: &str, max: usize) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{} is required", label)));
    }
    check_length(label, value, max)?;
    Ok(value.to_string())
}

/// Optional text: empty or blank input is normalised to `None`
pub fn optional_text(label: &str, value: Option<&str>, max: usize) -> Result<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            check_length(label, value, max)?;
            Ok(Some(value.to_string()))
        }
    }
}

/// Optional email: empty is allowed and normalised to `None`
pub fn optional_email(label: &str, value: Option<&str>, max: usize) -> Result<Option<String>> {
    let Some(email) = optional_text(label, value, max)? else {
        return Ok(None);
    };
    if !email.validate_email() {
        return Err(AppError::validation(format!("{} is not a valid email address", label)));
    }
    Ok(Some(email))
}

fn check_length(label: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(AppError::validation(format!(
            "{} cannot exceed {} characters",
            label, max
        )));
    }
    Ok(())
}
