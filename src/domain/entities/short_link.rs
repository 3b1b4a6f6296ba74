//! Short link entity: the durable slug → destination record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A stored short link.
///
/// `destination` already contains any tracking parameters; `utm` keeps the raw
/// map for display. `redirect_count` only ever grows, through the store's atomic
/// increment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLink {
    pub slug: String,
    pub destination: String,
    pub expire_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub utm: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub track_clicks: bool,
    pub redirect_count: i64,
}

impl ShortLink {
    /// Returns true if the link has an expiration at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_at.is_some_and(|e| e <= now)
    }
}

/// Fully resolved record handed to the store on insert.
///
/// The slug is final, the destination composed and the expiration normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShortLink {
    pub slug: String,
    pub destination: String,
    pub expire_at: Option<DateTime<Utc>>,
    pub utm: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub track_clicks: bool,
}

impl NewShortLink {
    /// Converts into the stored form with a zero redirect counter.
    pub fn into_short_link(self) -> ShortLink {
        ShortLink {
            slug: self.slug,
            destination: self.destination,
            expire_at: self.expire_at,
            utm: self.utm,
            created_at: self.created_at,
            created_by: self.created_by,
            track_clicks: self.track_clicks,
            redirect_count: 0,
        }
    }
}

/// Caller input for creating a short link.
///
/// Everything is raw user input; the engine validates and normalizes it.
#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    pub url: String,
    /// Custom slug. `None` or blank means "generate one".
    pub slug: Option<String>,
    /// Expiration string (RFC3339 or `YYYY-MM-DDTHH:MM:SS`). Blank means none.
    pub expiration: Option<String>,
    pub utm: HashMap<String, String>,
    pub track_clicks: bool,
    pub created_by: Option<String>,
}

/// Outcome of a successful create.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedLink {
    pub slug: String,
    pub destination: String,
    pub expire_at: Option<DateTime<Utc>>,
}

impl From<&ShortLink> for CreatedLink {
    fn from(link: &ShortLink) -> Self {
        Self {
            slug: link.slug.clone(),
            destination: link.destination.clone(),
            expire_at: link.expire_at,
        }
    }
}

/// Result of a slug availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    /// Empty when available; a human-readable reason otherwise.
    pub message: String,
}

impl Availability {
    pub fn available() -> Self {
        Self {
            available: true,
            message: String::new(),
        }
    }

    pub fn taken() -> Self {
        Self {
            available: false,
            message: "Slug is already taken".to_string(),
        }
    }
}
