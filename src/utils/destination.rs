//! Destination composition: base URL plus campaign tracking parameters.

use std::collections::HashMap;
use url::form_urlencoded;

/// Prefix applied to every tracking key.
const TRACKING_PREFIX: &str = "utm_";

/// Appends non-empty tracking parameters to `base` as `utm_<key>=<value>`.
///
/// Values are form-urlencoded; keys are used as given. If `base` already contains
/// a `?`, parameters are joined with `&`, otherwise the first one starts a new
/// query string. Entries with empty values are skipped. The order of appended
/// parameters follows map iteration and is unspecified.
///
/// Returns `base` unchanged when there is nothing to append.
pub fn compose_destination(base: &str, params: &HashMap<String, String>) -> String {
    let pairs: Vec<String> = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| {
            let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
            format!("{TRACKING_PREFIX}{key}={encoded}")
        })
        .collect();

    if pairs.is_empty() {
        return base.to_string();
    }

    let separator = if base.contains('?') { '&' } else { '?' };

    format!("{base}{separator}{}", pairs.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn params(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn query_set(url: &str) -> HashSet<String> {
        url.split_once('?')
            .map(|(_, q)| q.split('&').map(str::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_no_params_is_noop() {
        assert_eq!(
            compose_destination("https://example.com", &HashMap::new()),
            "https://example.com"
        );
    }

    #[test]
    fn test_all_empty_values_is_noop() {
        assert_eq!(
            compose_destination("https://example.com", &params(&[("source", "")])),
            "https://example.com"
        );
        assert_eq!(
            compose_destination(
                "https://example.com/?q=1",
                &params(&[("source", ""), ("medium", "")])
            ),
            "https://example.com/?q=1"
        );
    }

    #[test]
    fn test_single_param_starts_query() {
        assert_eq!(
            compose_destination("https://example.com", &params(&[("source", "google")])),
            "https://example.com?utm_source=google"
        );
    }

    #[test]
    fn test_existing_query_uses_ampersand() {
        assert_eq!(
            compose_destination(
                "https://example.com/?q=1",
                &params(&[("source", "newsletter")])
            ),
            "https://example.com/?q=1&utm_source=newsletter"
        );
    }

    #[test]
    fn test_multiple_params_membership() {
        let url = compose_destination(
            "https://example.com/landing",
            &params(&[("source", "google"), ("medium", "cpc"), ("campaign", "")]),
        );

        assert!(url.starts_with("https://example.com/landing?"));
        let expected: HashSet<String> = ["utm_source=google", "utm_medium=cpc"]
            .into_iter()
            .map(str::to_string)
            .collect();
        assert_eq!(query_set(&url), expected);
    }

    #[test]
    fn test_values_are_encoded() {
        let url = compose_destination(
            "https://example.com",
            &params(&[("campaign", "spring sale&more")]),
        );
        assert_eq!(url, "https://example.com?utm_campaign=spring+sale%26more");
    }
}
