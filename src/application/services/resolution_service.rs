//! Slug resolution engine: create, resolve, count, check availability.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use metrics::counter;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::domain::entities::{
    Availability, CacheProjection, CreateLinkRequest, CreatedLink, NewShortLink, RedirectDecision,
    Resolution, ResolutionSource, ShortLink,
};
use crate::domain::repositories::{LinkRepository, OwnerQuery};
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, ProjectionCache};
use crate::utils::{
    compose_destination, generate_slug, parse_expiration, validate_custom_slug, validate_url,
};

/// Attempts at inserting a generated slug before giving up.
const MAX_GENERATE_ATTEMPTS: usize = 5;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 100;

const CLICKS_RECORDED_TOTAL: &str = "shortlink_clicks_recorded_total";
const CLICK_FAILURES_TOTAL: &str = "shortlink_click_failures_total";

/// Engine settings, passed explicitly at construction.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// TTL for cached links without expiration, and upper bound otherwise.
    pub default_cache_ttl: Duration,
    /// Budget for each individual store or cache call.
    pub operation_timeout: Duration,
    /// Length of generated slugs.
    pub slug_length: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_cache_ttl: Duration::from_secs(24 * 60 * 60),
            operation_timeout: Duration::from_secs(5),
            slug_length: crate::utils::slug::DEFAULT_SLUG_LENGTH,
        }
    }
}

/// Component health as seen by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthReport {
    pub store: bool,
    pub cache: bool,
}

/// Orchestrates the store and the cache for link creation and lookup.
///
/// # Lookup path
///
/// 1. Cache hit: classify the cached projection; the store is not touched
/// 2. Cache miss: read the store; absent means [`RedirectDecision::NotFound`]
/// 3. Store hit: repopulate the cache (skipped when expired), then classify
///
/// Classification is redone on every lookup, so an expired link is reported as
/// [`RedirectDecision::Gone`] whether it came from the cache or the store.
///
/// # Failure policy
///
/// - Cache failures never surface; lookups degrade to store-only
/// - Store failures surface as [`AppError::StoreUnavailable`] or
///   [`AppError::Timeout`]
/// - Click counting failures are logged and dropped
pub struct ResolutionService {
    links: Arc<dyn LinkRepository>,
    cache: ProjectionCache,
    config: EngineConfig,
}

impl ResolutionService {
    /// Creates the engine from a store, a cache backend and its settings.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        config: EngineConfig,
    ) -> Self {
        let cache = ProjectionCache::new(cache, config.default_cache_ttl, config.operation_timeout);
        Self {
            links,
            cache,
            config,
        }
    }

    /// Creates a short link.
    ///
    /// Validates the URL, composes the destination with tracking parameters,
    /// normalizes the expiration, then inserts with the custom slug or a
    /// generated one. On success the projection is written to the cache.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a bad URL, custom slug or expiration
    /// - [`AppError::SlugConflict`] if the custom slug is taken
    /// - [`AppError::Internal`] if no free generated slug was found
    /// - [`AppError::StoreUnavailable`] / [`AppError::Timeout`] on store failure
    pub async fn create(&self, request: CreateLinkRequest) -> Result<CreatedLink, AppError> {
        let url = validate_url(&request.url)?;

        let custom_slug = request
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if let Some(slug) = custom_slug {
            validate_custom_slug(slug)?;
        }

        let expire_at = parse_expiration(request.expiration.as_deref().unwrap_or_default())?;
        let destination = compose_destination(url, &request.utm);

        let template = NewShortLink {
            slug: String::new(),
            destination,
            expire_at,
            utm: request.utm,
            created_at: Utc::now(),
            created_by: request.created_by,
            track_clicks: request.track_clicks,
        };

        let link = match custom_slug {
            Some(slug) => {
                self.insert(NewShortLink {
                    slug: slug.to_string(),
                    ..template
                })
                .await?
            }
            None => self.insert_generated(template).await?,
        };

        self.cache
            .put(&link.slug, &CacheProjection::from(&link), Utc::now())
            .await;

        info!(
            slug = %link.slug,
            expires = ?link.expire_at,
            track_clicks = link.track_clicks,
            "Short link created"
        );

        Ok(CreatedLink::from(&link))
    }

    /// Resolves a slug to a redirect decision.
    ///
    /// Does not count the click; see [`Self::record_click_if_tracked`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] / [`AppError::Timeout`] when the
    /// cache missed and the store could not be read.
    pub async fn resolve(&self, slug: &str) -> Result<Resolution, AppError> {
        if let Some(projection) = self.cache.get(slug).await {
            return Ok(classify(slug, projection, ResolutionSource::Cache, Utc::now()));
        }

        let Some(link) = self
            .with_timeout("find_by_slug", self.links.find_by_slug(slug))
            .await?
        else {
            debug!(slug = %slug, "Slug not found");
            return Ok(Resolution::not_found(slug));
        };

        let projection = CacheProjection::from(&link);
        let now = Utc::now();
        self.cache.put(slug, &projection, now).await;

        Ok(classify(slug, projection, ResolutionSource::Store, now))
    }

    /// Resolves a slug and, when the link is tracked and redirectable, counts the
    /// click in a background task.
    ///
    /// The returned resolution never waits on the counter.
    pub async fn resolve_for_redirect(self: &Arc<Self>, slug: &str) -> Result<Resolution, AppError> {
        let resolution = self.resolve(slug).await?;

        if resolution.should_record_click() {
            let engine = Arc::clone(self);
            let slug = resolution.slug.clone();
            tokio::spawn(async move {
                engine.record_click(&slug).await;
            });
        }

        Ok(resolution)
    }

    /// Counts the click for `resolution` if its link is tracked and the decision
    /// is a redirect. Returns whether a count was attempted.
    pub async fn record_click_if_tracked(&self, resolution: &Resolution) -> bool {
        if !resolution.should_record_click() {
            return false;
        }
        self.record_click(&resolution.slug).await;
        true
    }

    /// Increments the redirect counter in the store.
    ///
    /// Best-effort: failures are logged and swallowed.
    pub async fn record_click(&self, slug: &str) {
        match self
            .with_timeout(
                "increment_redirect_count",
                self.links.increment_redirect_count(slug),
            )
            .await
        {
            Ok(true) => {
                debug!(slug = %slug, "Click recorded");
                counter!(CLICKS_RECORDED_TOTAL).increment(1);
            }
            Ok(false) => {
                warn!(slug = %slug, "Click not recorded: no such link in store");
                counter!(CLICK_FAILURES_TOTAL).increment(1);
            }
            Err(e) => {
                warn!(slug = %slug, error = %e, "Failed to record click");
                counter!(CLICK_FAILURES_TOTAL).increment(1);
            }
        }
    }

    /// Reports whether `slug` is free in the store.
    ///
    /// The cache is not consulted: availability reflects durable state only.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `slug` is not a valid custom slug
    /// - [`AppError::StoreUnavailable`] / [`AppError::Timeout`] on store failure
    pub async fn check_availability(&self, slug: &str) -> Result<Availability, AppError> {
        let slug = slug.trim();
        validate_custom_slug(slug)?;

        let existing = self
            .with_timeout("find_by_slug", self.links.find_by_slug(slug))
            .await?;

        Ok(if existing.is_some() {
            Availability::taken()
        } else {
            Availability::available()
        })
    }

    /// Lists links created by `owner`, newest first.
    ///
    /// A `page` or `page_size` of zero falls back to [`DEFAULT_PAGE`] /
    /// [`DEFAULT_PAGE_SIZE`]. Expired links are left out unless
    /// `include_expired` is set.
    pub async fn list_by_owner(
        &self,
        owner: &str,
        page: u32,
        page_size: u32,
        include_expired: bool,
    ) -> Result<Vec<ShortLink>, AppError> {
        let query = OwnerQuery {
            owner: owner.to_string(),
            page: if page == 0 { DEFAULT_PAGE } else { page },
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
            include_expired,
            now: Utc::now(),
        };

        self.with_timeout("list_by_owner", self.links.list_by_owner(query))
            .await
    }

    /// Checks the store and the cache.
    pub async fn health(&self) -> HealthReport {
        let store = timeout(self.config.operation_timeout, self.links.health_check())
            .await
            .unwrap_or(false);
        let cache = self.cache.health_check().await;

        HealthReport { store, cache }
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        self.with_timeout("insert", self.links.insert(new_link)).await
    }

    /// Inserts `template` under freshly generated slugs, retrying on collision.
    async fn insert_generated(&self, template: NewShortLink) -> Result<ShortLink, AppError> {
        for attempt in 1..=MAX_GENERATE_ATTEMPTS {
            let candidate = NewShortLink {
                slug: generate_slug(self.config.slug_length),
                ..template.clone()
            };

            match self.insert(candidate).await {
                Ok(link) => return Ok(link),
                Err(AppError::SlugConflict { slug }) => {
                    warn!(attempt, slug = %slug, "Generated slug collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal("Failed to generate unique slug"))
    }

    /// Runs a store call under the per-operation timeout.
    async fn with_timeout<T, F>(&self, operation: &'static str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match timeout(self.config.operation_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(operation, "Store call timed out");
                Err(AppError::Timeout { operation })
            }
        }
    }
}

fn classify(
    slug: &str,
    projection: CacheProjection,
    source: ResolutionSource,
    now: DateTime<Utc>,
) -> Resolution {
    let decision = RedirectDecision::classify(projection.expire_at, now);
    debug!(slug = %slug, ?decision, ?source, "Slug resolved");

    Resolution {
        slug: slug.to_string(),
        decision,
        destination: Some(projection.url),
        track_clicks: projection.track_clicks,
        source,
    }
}
