//! In-memory implementation of the link repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, OwnerQuery};
use crate::error::AppError;

/// Link store backed by a `DashMap`.
///
/// Insert goes through the map's entry API, so the check for an existing slug
/// and the write happen under one shard lock: of N concurrent inserts with the
/// same slug exactly one wins. Counter increments mutate the entry in place
/// under the same lock.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    links: DashMap<String, ShortLink>,
}

impl MemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        match self.links.entry(new_link.slug.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(new_link.slug)),
            Entry::Vacant(vacant) => {
                let link = new_link.into_short_link();
                vacant.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links.get(slug).map(|link| link.value().clone()))
    }

    async fn increment_redirect_count(&self, slug: &str) -> Result<bool, AppError> {
        match self.links.get_mut(slug) {
            Some(mut link) => {
                link.redirect_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_by_owner(&self, query: OwnerQuery) -> Result<Vec<ShortLink>, AppError> {
        let mut links: Vec<ShortLink> = self
            .links
            .iter()
            .filter(|link| link.created_by.as_deref() == Some(query.owner.as_str()))
            .filter(|link| query.include_expired || !link.is_expired_at(query.now))
            .map(|link| link.value().clone())
            .collect();

        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.slug.cmp(&b.slug))
        });

        Ok(links
            .into_iter()
            .skip(usize::try_from(query.offset()).unwrap_or(usize::MAX))
            .take(query.page_size as usize)
            .collect())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
