mod common;

use async_trait::async_trait;
use shortlink::infrastructure::cache::{CacheError, CacheResult, CacheService};
use std::sync::Arc;
use std::time::Duration;

struct UnreachableCache;

#[async_trait]
impl CacheService for UnreachableCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

#[tokio::test]
async fn test_health_ok() {
    let app = common::create_test_app();

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
}

#[tokio::test]
async fn test_health_degraded_when_cache_down() {
    let app = common::create_test_app_with_cache(Arc::new(UnreachableCache));

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), 503);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "error");
}
