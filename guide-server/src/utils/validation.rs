//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by
//! the services before anything is written to the sheet.

use shared::{AppError, AppResult, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Restaurant, category, menu and reviewer names
pub const MAX_NAME_LEN: usize = 200;

/// Review comments
pub const MAX_COMMENT_LEN: usize = 2000;

/// Single tag
pub const MAX_TAG_LEN: usize = 50;

// ── Rating bounds ───────────────────────────────────────────────────

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    validate_length(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: Option<&str>, field: &str, max_len: usize) -> AppResult<()> {
    match value {
        Some(v) => validate_length(v, field, max_len),
        None => Ok(()),
    }
}

fn validate_length(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a submitted rating and truncate it to an integer in 1..=5
pub fn validate_rating(rate: Option<f64>) -> AppResult<i64> {
    let value = rate.ok_or_else(|| AppError::required("rate"))?;
    if value < MIN_RATING as f64 || value > MAX_RATING as f64 {
        return Err(AppError::new(ErrorCode::RatingOutOfRange).with_detail("rate", value));
    }
    Ok(value.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Sushi Ko", "name", MAX_NAME_LEN).is_ok());
        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        let long = "가".repeat(MAX_NAME_LEN + 1);
        let err = validate_required_text(&long, "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        // multi-byte text is measured in characters
        assert!(validate_required_text(&"가".repeat(MAX_NAME_LEN), "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(None, "comment", 3).is_ok());
        assert!(validate_optional_text(Some("abcd"), "comment", 3).is_err());
    }

    #[test]
    fn test_rating_bounds() {
        assert_eq!(validate_rating(Some(1.0)).unwrap(), 1);
        assert_eq!(validate_rating(Some(5.0)).unwrap(), 5);
        assert_eq!(validate_rating(Some(4.7)).unwrap(), 4);
        assert_eq!(
            validate_rating(Some(0.0)).unwrap_err().code,
            ErrorCode::RatingOutOfRange
        );
        assert_eq!(
            validate_rating(Some(6.0)).unwrap_err().code,
            ErrorCode::RatingOutOfRange
        );
        assert_eq!(validate_rating(None).unwrap_err().code, ErrorCode::RequiredField);
    }
}
