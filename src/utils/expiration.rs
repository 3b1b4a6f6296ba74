//! Expiration timestamp parsing.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

use crate::error::AppError;

/// Layout accepted when the input carries no timezone; interpreted as UTC.
/// A trailing fraction of a second is optional and kept as given.
const NAIVE_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses an expiration string into a UTC instant.
///
/// - Empty (after trimming): no expiration.
/// - RFC3339: truncated to whole seconds and converted to UTC.
/// - `YYYY-MM-DDTHH:MM:SS[.fff]`: interpreted as UTC, fraction kept.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for any other non-empty input.
pub fn parse_expiration(input: &str) -> Result<Option<DateTime<Utc>>, AppError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(parsed.trunc_subsecs(0).with_timezone(&Utc)));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, NAIVE_LAYOUT) {
        return Ok(Some(naive.and_utc()));
    }

    Err(AppError::validation(
        "Invalid expiration format, expected RFC3339 or YYYY-MM-DDTHH:MM:SS",
    ))
}
