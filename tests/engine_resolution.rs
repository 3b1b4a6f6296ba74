//! End-to-end engine behaviour over the in-memory adapters.

mod common;

use async_trait::async_trait;
use serde_json::json;
use shortlink::application::services::{EngineConfig, ResolutionService};
use shortlink::domain::entities::{CreateLinkRequest, RedirectDecision, ResolutionSource};
use shortlink::infrastructure::cache::{
    CacheError, CacheResult, CacheService, MemoryCache, NullCache,
};
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use std::sync::Arc;
use std::time::Duration;

/// Cache whose every call fails, as if Redis went away after startup.
struct BrokenCache;

#[async_trait]
impl CacheService for BrokenCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::Operation("broken pipe".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Err(CacheError::Operation("broken pipe".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Every cache the engine may run with: working, disabled and failing.
fn caches() -> Vec<(&'static str, Arc<dyn CacheService>)> {
    vec![
        ("memory", Arc::new(MemoryCache::new())),
        ("null", Arc::new(NullCache::new())),
        ("broken", Arc::new(BrokenCache)),
    ]
}

fn request(url: &str, slug: &str) -> CreateLinkRequest {
    CreateLinkRequest {
        url: url.to_string(),
        slug: Some(slug.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_store_only_round_trip() {
    let links = Arc::new(MemoryLinkRepository::new());
    let engine = ResolutionService::new(links, Arc::new(NullCache::new()), EngineConfig::default());

    let created = engine
        .create(request("https://example.com/a", "storeonly"))
        .await
        .unwrap();
    let resolution = engine.resolve(&created.slug).await.unwrap();

    assert_eq!(resolution.decision, RedirectDecision::Permanent);
    assert_eq!(resolution.source, ResolutionSource::Store);
    assert_eq!(resolution.destination.as_deref(), Some("https://example.com/a"));
}

#[tokio::test]
async fn test_broken_cache_is_invisible_to_callers() {
    let app = common::create_test_app_with_cache(Arc::new(BrokenCache));

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com", "slug": "nocache01", "trackClicks": true }))
        .await;
    assert_eq!(response.status_code(), 201);

    let response = app.server.get("/nocache01").await;
    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.com");

    assert!(common::wait_for_redirect_count(&app.links, "nocache01", 1).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_clicks_are_all_counted() {
    const CLICKS: i64 = 64;

    let app = common::create_test_app();
    let mut req = request("https://example.com", "popular01");
    req.track_clicks = true;
    app.engine.create(req).await.unwrap();

    let handles: Vec<_> = (0..CLICKS)
        .map(|_| {
            let engine = app.engine.clone();
            tokio::spawn(async move {
                let resolution = engine.resolve("popular01").await.unwrap();
                engine.record_click_if_tracked(&resolution).await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap());
    }

    assert_eq!(common::redirect_count(&app.links, "popular01").await, CLICKS);
}

#[tokio::test]
async fn test_expired_link_is_gone_and_not_counted_with_any_cache() {
    for (name, cache) in caches() {
        let app = common::create_test_app_with_cache(cache);
        let mut req = request("https://example.com/old", "expired01");
        req.expiration = Some("2020-01-01T00:00:00Z".to_string());
        req.track_clicks = true;
        app.engine.create(req).await.unwrap();

        // Twice, so a second read would see anything the first one cached.
        for _ in 0..2 {
            let resolution = app.engine.resolve("expired01").await.unwrap();
            assert_eq!(resolution.decision, RedirectDecision::Gone, "{name}");
            assert!(!app.engine.record_click_if_tracked(&resolution).await, "{name}");
        }

        assert_eq!(common::redirect_count(&app.links, "expired01").await, 0, "{name}");
    }
}

#[tokio::test]
async fn test_expiring_link_is_temporary_with_any_cache() {
    for (name, cache) in caches() {
        let app = common::create_test_app_with_cache(cache);
        let mut req = request("https://example.com/sale", "expiring1");
        req.expiration = Some("2099-12-31T23:59:59Z".to_string());
        app.engine.create(req).await.unwrap();

        for _ in 0..2 {
            let resolution = app.engine.resolve("expiring1").await.unwrap();
            assert_eq!(resolution.decision, RedirectDecision::Temporary, "{name}");
            assert_eq!(
                resolution.destination.as_deref(),
                Some("https://example.com/sale"),
                "{name}"
            );
        }
    }
}

#[tokio::test]
async fn test_availability_ignores_cache_state() {
    for (name, cache) in caches() {
        let app = common::create_test_app_with_cache(cache);
        app.engine
            .create(request("https://example.com", "taken001"))
            .await
            .unwrap();

        let taken = app.engine.check_availability("taken001").await.unwrap();
        assert!(!taken.available, "{name}");

        let free = app.engine.check_availability("free0001").await.unwrap();
        assert!(free.available, "{name}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_creates_have_one_winner_with_any_cache() {
    for (name, cache) in caches() {
        let app = common::create_test_app_with_cache(cache);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = app.engine.clone();
                tokio::spawn(async move {
                    engine
                        .create(request(&format!("https://example.com/{i}"), "contended"))
                        .await
                })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1, "{name}");
        assert_eq!(app.links.len(), 1, "{name}");
    }
}
