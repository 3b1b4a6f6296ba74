//! Redirect decision derived from a link's expiration.

use chrono::{DateTime, Utc};

/// Terminal classification of a slug lookup.
///
/// Each variant maps one-to-one to an HTTP outcome:
/// Permanent → 301, Temporary → 302, Gone → 410, NotFound → 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectDecision {
    Permanent,
    Temporary,
    Gone,
    NotFound,
}

impl RedirectDecision {
    /// Classifies an existing link.
    ///
    /// No expiration is permanent, a future expiration temporary, and an
    /// expiration at or before `now` gone.
    pub fn classify(expire_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        match expire_at {
            None => Self::Permanent,
            Some(expire_at) if expire_at > now => Self::Temporary,
            Some(_) => Self::Gone,
        }
    }

    /// Returns true for decisions that send the client to the destination.
    pub fn is_redirect(self) -> bool {
        matches!(self, Self::Permanent | Self::Temporary)
    }
}

/// Where a resolved projection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Cache,
    Store,
    /// Nothing was found anywhere.
    None,
}

/// Outcome of resolving a slug.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub slug: String,
    pub decision: RedirectDecision,
    /// Destination URL; `None` only for [`RedirectDecision::NotFound`].
    pub destination: Option<String>,
    pub track_clicks: bool,
    pub source: ResolutionSource,
}

impl Resolution {
    pub fn not_found(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            decision: RedirectDecision::NotFound,
            destination: None,
            track_clicks: false,
            source: ResolutionSource::None,
        }
    }

    /// Whether the redirect counter should be incremented for this lookup.
    pub fn should_record_click(&self) -> bool {
        self.track_clicks && self.decision.is_redirect()
    }
}
