//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod check_slug;
pub mod health;
pub mod redirect;
pub mod shorten;
pub mod slugs;

pub use check_slug::check_slug_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use slugs::slugs_handler;
