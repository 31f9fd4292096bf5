//! Reference id extraction.

use super::patterns::DIGIT_RUN;
use crate::error::ExtractionError;

/// First run of digits after any leading non-digit text.
pub fn extract_leading_id(line: &str) -> Result<u64, ExtractionError> {
    DIGIT_RUN
        .find(line)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| ExtractionError::MissingReferenceId(line.to_string()))
}
