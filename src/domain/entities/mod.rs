//! Core domain entities.
//!
//! - [`ShortLink`] - Durable slug → destination record
//! - [`CacheProjection`] - Reduced view of a link stored in the cache
//! - [`RedirectDecision`] / [`Resolution`] - Outcome of resolving a slug
//!
//! Creation inputs are kept apart from stored records: [`CreateLinkRequest`] is raw
//! user input, [`NewShortLink`] is the normalized record handed to the store.

pub mod decision;
pub mod projection;
pub mod short_link;

pub use decision::{RedirectDecision, Resolution, ResolutionSource};
pub use projection::CacheProjection;
pub use short_link::{Availability, CreateLinkRequest, CreatedLink, NewShortLink, ShortLink};
