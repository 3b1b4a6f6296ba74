#![allow(dead_code)]

use axum_test::TestServer;
use shortlink::application::services::{EngineConfig, ResolutionService};
use shortlink::domain::repositories::LinkRepository;
use shortlink::infrastructure::cache::{CacheService, MemoryCache};
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use shortlink::routes::router;
use shortlink::state::AppState;
use std::sync::Arc;
use std::time::Duration;

pub const BASE_URL: &str = "https://sho.rt/";
pub const USER_HEADER: &str = "X-Authenticated-User";

/// Router over in-memory adapters, with handles on the adapters for assertions.
pub struct TestApp {
    pub server: TestServer,
    pub engine: Arc<ResolutionService>,
    pub links: Arc<MemoryLinkRepository>,
}

pub fn create_test_app() -> TestApp {
    create_test_app_with_cache(Arc::new(MemoryCache::new()))
}

pub fn create_test_app_with_cache(cache: Arc<dyn CacheService>) -> TestApp {
    let links = Arc::new(MemoryLinkRepository::new());
    let engine = Arc::new(ResolutionService::new(
        links.clone(),
        cache,
        EngineConfig::default(),
    ));
    let state = AppState::new(engine.clone(), BASE_URL);
    let server = TestServer::new(router(state)).unwrap();

    TestApp {
        server,
        engine,
        links,
    }
}

pub async fn redirect_count(links: &MemoryLinkRepository, slug: &str) -> i64 {
    links
        .find_by_slug(slug)
        .await
        .unwrap()
        .map(|link| link.redirect_count)
        .unwrap_or_default()
}

/// Polls until the background click counter reaches `expected`.
pub async fn wait_for_redirect_count(links: &MemoryLinkRepository, slug: &str, expected: i64) -> bool {
    for _ in 0..200 {
        if redirect_count(links, slug).await == expected {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
