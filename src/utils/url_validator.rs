//! Destination URL validation.

use url::Url;

use crate::error::AppError;

/// Validates a destination URL and returns it trimmed.
///
/// # Rules
///
/// - Must not be empty
/// - Must parse as an absolute URL
/// - Scheme must be `http` or `https`
/// - Must have a non-empty host
///
/// The input is returned as written (trimmed), not re-serialized, so the
/// stored destination matches what the user supplied.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with the violated rule.
pub fn validate_url(input: &str) -> Result<&str, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Missing URL field"));
    }

    let parsed = Url::parse(trimmed).map_err(|_| AppError::validation("Invalid URL format"))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AppError::validation(
            "URL must start with http:// or https://",
        ));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(AppError::validation("URL must have a valid host"));
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(input: &str) -> String {
        validate_url(input).unwrap_err().to_string()
    }

    #[test]
    fn test_valid_urls() {
        assert_eq!(validate_url("https://example.com").unwrap(), "https://example.com");
        assert_eq!(
            validate_url("  http://example.com/path?q=1  ").unwrap(),
            "http://example.com/path?q=1"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(message("   "), "Missing URL field");
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(message("not a url"), "Invalid URL format");
    }

    #[test]
    fn test_wrong_scheme() {
        assert_eq!(message("ftp://example.com"), "URL must start with http:// or https://");
        assert_eq!(message("javascript:alert(1)"), "URL must start with http:// or https://");
    }
}
