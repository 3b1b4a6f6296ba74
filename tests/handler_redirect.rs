mod common;

use serde_json::json;
use std::time::Duration;

async fn create(app: &common::TestApp, body: serde_json::Value) {
    let response = app.server.post("/api/shorten").json(&body).await;
    assert_eq!(response.status_code(), 201);
}

#[tokio::test]
async fn test_redirect_permanent() {
    let app = common::create_test_app();
    create(
        &app,
        json!({ "url": "https://example.com/target", "slug": "forever01" }),
    )
    .await;

    let response = app.server.get("/forever01").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.com/target");
    assert!(response.headers().get("cache-control").is_none());
}

#[tokio::test]
async fn test_redirect_temporary_until_expiration() {
    let app = common::create_test_app();
    create(
        &app,
        json!({
            "url": "https://example.com/sale",
            "slug": "sale20991",
            "expiration": "2099-12-31T23:59:59"
        }),
    )
    .await;

    let response = app.server.get("/sale20991").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/sale");
}

#[tokio::test]
async fn test_redirect_expired_is_gone() {
    let app = common::create_test_app();
    create(
        &app,
        json!({
            "url": "https://example.com/old",
            "slug": "expired01",
            "expiration": "2020-01-01T00:00:00Z",
            "trackClicks": true
        }),
    )
    .await;

    let response = app.server.get("/expired01").await;

    assert_eq!(response.status_code(), 410);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "gone");
    assert!(response.headers().get("location").is_none());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(common::redirect_count(&app.links, "expired01").await, 0);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let app = common::create_test_app();

    let response = app.server.get("/notfound1").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_tracked_redirect_counts_clicks_and_disables_caching() {
    let app = common::create_test_app();
    create(
        &app,
        json!({ "url": "https://example.com", "slug": "tracked01", "trackClicks": true }),
    )
    .await;

    for _ in 0..3 {
        let response = app.server.get("/tracked01").await;

        assert_eq!(response.status_code(), 301);
        assert_eq!(
            response.header("cache-control"),
            "no-store, no-cache, must-revalidate, proxy-revalidate"
        );
        assert_eq!(response.header("pragma"), "no-cache");
        assert_eq!(response.header("expires"), "0");
    }

    assert!(common::wait_for_redirect_count(&app.links, "tracked01", 3).await);
}

#[tokio::test]
async fn test_untracked_redirect_is_not_counted() {
    let app = common::create_test_app();
    create(
        &app,
        json!({ "url": "https://example.com", "slug": "plain0001" }),
    )
    .await;

    assert_eq!(app.server.get("/plain0001").await.status_code(), 301);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(common::redirect_count(&app.links, "plain0001").await, 0);
}
