//! Slug generation and validation utilities.
//!
//! Generated slugs are drawn uniformly from a 36-character alphabet using the
//! operating system's CSPRNG. Custom slugs supplied by users are validated
//! against a stricter length/charset policy.

use crate::error::AppError;

/// Characters used for generated slugs: lowercase ASCII letters and digits.
pub const SLUG_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length used when the caller asks for a zero-length slug.
pub const DEFAULT_SLUG_LENGTH: usize = 8;

/// Custom slug length bounds (inclusive).
pub const CUSTOM_SLUG_MIN_LEN: usize = 8;
pub const CUSTOM_SLUG_MAX_LEN: usize = 16;

/// Largest multiple of the alphabet size that fits in a byte. Bytes at or above
/// it are rejected so every character is equally likely.
const REJECTION_LIMIT: u8 = (256 / SLUG_ALPHABET.len() * SLUG_ALPHABET.len()) as u8;

/// Generates a random slug of `length` characters.
///
/// A `length` of zero yields [`DEFAULT_SLUG_LENGTH`] characters.
///
/// # Panics
///
/// Panics if the system random number generator fails. That is an environment
/// fault, not a recoverable request error.
///
/// # Examples
///
/// ```ignore
/// let slug = generate_slug(8);
/// assert_eq!(slug.len(), 8);
/// ```
pub fn generate_slug(length: usize) -> String {
    let length = if length == 0 {
        DEFAULT_SLUG_LENGTH
    } else {
        length
    };

    let mut slug = String::with_capacity(length);
    let mut buffer = [0u8; 64];

    while slug.len() < length {
        getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

        for &byte in buffer.iter().filter(|&&b| b < REJECTION_LIMIT) {
            if slug.len() == length {
                break;
            }
            slug.push(SLUG_ALPHABET[byte as usize % SLUG_ALPHABET.len()] as char);
        }
    }

    slug
}

/// Validates a user-provided custom slug.
///
/// # Rules
///
/// - Must not be empty
/// - Length: 8-16 characters
/// - Allowed characters: ASCII letters and digits
///
/// # Errors
///
/// Returns [`AppError::Validation`] with a reason that callers show verbatim.
pub fn validate_custom_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() {
        return Err(AppError::validation("Missing slug field"));
    }

    let len = slug.chars().count();
    if !(CUSTOM_SLUG_MIN_LEN..=CUSTOM_SLUG_MAX_LEN).contains(&len) {
        return Err(AppError::validation(
            "Custom slug must be between 8 and 16 characters",
        ));
    }

    if !slug.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::validation(
            "Custom slug must be alphanumeric (letters and numbers only)",
        ));
    }

    Ok(())
}
