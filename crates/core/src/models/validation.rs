//! Field checks shared by the `New*` input records.

use crate::errors::CoreError;

/// Normalize a currency code: trimmed, uppercased, exactly 3 ASCII letters.
pub fn currency_code(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim().to_uppercase();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::Validation(format!(
            "Invalid {field} '{value}': must be exactly 3 ASCII letters (e.g., USD, EUR, ARS)"
        )));
    }
    Ok(trimmed)
}

/// A monetary amount, quantity or price must be finite and strictly positive.
pub fn positive(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CoreError::Validation(format!(
            "{field} must be a positive number (got {value})"
        )));
    }
    Ok(())
}

/// Required free-text field: returns the trimmed value, rejecting blanks.
pub fn required(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}
