mod common;

use serde_json::json;
use shortlink::domain::repositories::LinkRepository;

#[tokio::test]
async fn test_shorten_generates_slug() {
    let app = common::create_test_app();

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/landing" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<serde_json::Value>();
    let slug = json["slug"].as_str().unwrap();
    assert_eq!(slug.len(), 8);
    assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    assert_eq!(json["shortLink"], format!("https://sho.rt/{slug}"));
    assert_eq!(json["destination"], "https://example.com/landing");
    assert!(json.get("expiration").is_none());
}

#[tokio::test]
async fn test_shorten_with_custom_slug_utms_and_expiration() {
    let app = common::create_test_app();

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({
            "url": "https://example.com/landing?ref=home",
            "slug": "Promo2025",
            "expiration": "2099-01-01T08:00:00+08:00",
            "utms": { "source": "newsletter" },
            "trackClicks": true
        }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["slug"], "Promo2025");
    assert_eq!(
        json["destination"],
        "https://example.com/landing?ref=home&utm_source=newsletter"
    );
    assert_eq!(json["expiration"], "2099-01-01T00:00:00Z");

    let stored = app.links.find_by_slug("Promo2025").await.unwrap().unwrap();
    assert!(stored.track_clicks);
    assert_eq!(stored.utm.get("source").map(String::as_str), Some("newsletter"));
}

#[tokio::test]
async fn test_shorten_records_authenticated_user() {
    let app = common::create_test_app();

    let response = app
        .server
        .post("/api/shorten")
        .add_header(common::USER_HEADER, "alice")
        .json(&json!({ "url": "https://example.com", "slug": "alicelink" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let stored = app.links.find_by_slug("alicelink").await.unwrap().unwrap();
    assert_eq!(stored.created_by.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_shorten_validation_messages() {
    let app = common::create_test_app();

    let cases = [
        (json!({}), "Missing URL field"),
        (
            json!({ "url": "ftp://example.com" }),
            "URL must start with http:// or https://",
        ),
        (
            json!({ "url": "https://example.com", "slug": "short" }),
            "Custom slug must be between 8 and 16 characters",
        ),
        (
            json!({ "url": "https://example.com", "slug": "not-alnum!" }),
            "Custom slug must be alphanumeric (letters and numbers only)",
        ),
        (
            json!({ "url": "https://example.com", "expiration": "tomorrow" }),
            "Invalid expiration format, expected RFC3339 or YYYY-MM-DDTHH:MM:SS",
        ),
    ];

    for (body, message) in cases {
        let response = app.server.post("/api/shorten").json(&body).await;

        assert_eq!(response.status_code(), 400, "body: {body}");
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["code"], "validation_error");
        assert_eq!(json["error"]["message"], message);
    }

    assert!(app.links.is_empty());
}

#[tokio::test]
async fn test_shorten_duplicate_slug_conflicts() {
    let app = common::create_test_app();
    let body = json!({ "url": "https://example.com", "slug": "taken1234" });

    app.server
        .post("/api/shorten")
        .json(&body)
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = app.server.post("/api/shorten").json(&body).await;

    assert_eq!(response.status_code(), 409);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "Slug is already taken");
    assert_eq!(app.links.len(), 1);
}
