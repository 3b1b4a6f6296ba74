//! DTOs for listing the caller's short links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use std::collections::HashMap;

use super::pagination::PaginationParams;
use crate::domain::entities::ShortLink;

/// Query parameters of `GET /api/slugs`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugsQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub include_expired: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SlugsResponse {
    pub slugs: Vec<SlugItem>,
}

/// One link owned by the caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugItem {
    pub slug: String,
    pub short_link: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
    pub redirect_count: i64,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub utms: HashMap<String, String>,
    pub track_clicks: bool,
}

impl SlugItem {
    pub fn new(link: ShortLink, short_link: String) -> Self {
        Self {
            slug: link.slug,
            short_link,
            destination: link.destination,
            expiration: link.expire_at,
            redirect_count: link.redirect_count,
            utms: link.utm,
            track_clicks: link.track_clicks,
        }
    }
}
