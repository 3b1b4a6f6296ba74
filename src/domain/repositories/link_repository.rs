//! Repository trait for short link records.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Page request for [`LinkRepository::list_by_owner`].
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerQuery {
    pub owner: String,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    /// When false, links with `expire_at <= now` are excluded.
    pub include_expired: bool,
    pub now: DateTime<Utc>,
}

impl OwnerQuery {
    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// [`offset`](Self::offset) as a SQL `BIGINT`, clamped to `i64::MAX`.
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset()).unwrap_or(i64::MAX)
    }
}

/// Durable store for short links.
///
/// The store owns slug uniqueness (a unique index) and the redirect counter
/// (an atomic increment). The engine never reads-modifies-writes either.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SlugConflict`] if the slug already exists.
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError>;

    /// Atomically increments the redirect counter.
    ///
    /// Returns `Ok(false)` when no link matches `slug`.
    async fn increment_redirect_count(&self, slug: &str) -> Result<bool, AppError>;

    /// Lists links created by `query.owner`, newest first.
    async fn list_by_owner(&self, query: OwnerQuery) -> Result<Vec<ShortLink>, AppError>;

    /// Checks that the store is reachable.
    async fn health_check(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        let mut query = OwnerQuery {
            owner: "alice".to_string(),
            page: 1,
            page_size: 25,
            include_expired: false,
            now: Utc::now(),
        };
        assert_eq!(query.offset(), 0);

        query.page = 3;
        assert_eq!(query.offset(), 50);

        query.page = 0;
        assert_eq!(query.offset(), 0);
    }
}
