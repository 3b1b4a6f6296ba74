//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::entities::{CreateLinkRequest, CreatedLink};

/// Request to shorten a single URL.
///
/// Missing `url` is accepted by the deserializer and reported by the engine
/// with its own validation message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[serde(default)]
    pub url: String,

    /// Custom slug; generated when absent or empty.
    #[serde(default)]
    pub slug: Option<String>,

    /// RFC3339 or `YYYY-MM-DDTHH:MM:SS` (UTC).
    #[serde(default)]
    pub expiration: Option<String>,

    /// Tracking parameters, appended to the destination as `utm_<key>`.
    #[serde(default)]
    pub utms: HashMap<String, String>,

    #[serde(default)]
    pub track_clicks: bool,
}

impl ShortenRequest {
    /// Converts the payload into an engine request on behalf of `created_by`.
    pub fn into_create_request(self, created_by: Option<String>) -> CreateLinkRequest {
        CreateLinkRequest {
            url: self.url,
            slug: self.slug,
            expiration: self.expiration,
            utm: self.utms,
            track_clicks: self.track_clicks,
            created_by,
        }
    }
}

/// Created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub slug: String,
    pub short_link: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

impl ShortenResponse {
    pub fn new(created: CreatedLink, short_link: String) -> Self {
        Self {
            slug: created.slug,
            short_link,
            destination: created.destination,
            expiration: created.expire_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: ShortenRequest = serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        assert_eq!(req.url, "https://example.com");
        assert!(req.slug.is_none());
        assert!(req.utms.is_empty());
        assert!(!req.track_clicks);
    }

    #[test]
    fn test_request_camel_case_fields() {
        let req: ShortenRequest = serde_json::from_str(
            r#"{"url": "https://example.com", "trackClicks": true, "utms": {"source": "mail"}}"#,
        )
        .unwrap();
        assert!(req.track_clicks);

        let create = req.into_create_request(Some("alice".to_string()));
        assert_eq!(create.utm.get("source").map(String::as_str), Some("mail"));
        assert_eq!(create.created_by.as_deref(), Some("alice"));
    }

    #[test]
    fn test_response_omits_missing_expiration() {
        let response = ShortenResponse {
            slug: "abcd1234".to_string(),
            short_link: "http://localhost:8000/abcd1234".to_string(),
            destination: "https://example.com".to_string(),
            expiration: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["shortLink"], "http://localhost:8000/abcd1234");
        assert!(json.get("expiration").is_none());
    }
}
