//! Data Transfer Objects for API requests and responses.
//!
//! Field names follow the public JSON contract (`camelCase`).

pub mod check_slug;
pub mod health;
pub mod pagination;
pub mod shorten;
pub mod slugs;
