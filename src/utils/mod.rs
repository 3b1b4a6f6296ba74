//! Pure helpers used when creating short links.
//!
//! - [`slug`] - Slug generation and custom slug validation
//! - [`destination`] - Tracking parameter composition
//! - [`expiration`] - Expiration timestamp parsing
//! - [`url_validator`] - Destination URL validation

pub mod destination;
pub mod expiration;
pub mod slug;
pub mod url_validator;

pub use destination::compose_destination;
pub use expiration::parse_expiration;
pub use slug::{generate_slug, validate_custom_slug};
pub use url_validator::validate_url;
