//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, OwnerQuery};
use crate::error::{AppError, map_sqlx_error};

const SELECT_COLUMNS: &str = "slug, destination, expire_at, utm, created_at, created_by, \
                              track_clicks, redirect_count";

/// Row shape of the `short_links` table.
#[derive(Debug, FromRow)]
struct ShortLinkRow {
    slug: String,
    destination: String,
    expire_at: Option<DateTime<Utc>>,
    utm: Json<HashMap<String, String>>,
    created_at: DateTime<Utc>,
    created_by: Option<String>,
    track_clicks: bool,
    redirect_count: i64,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        Self {
            slug: row.slug,
            destination: row.destination,
            expire_at: row.expire_at,
            utm: row.utm.0,
            created_at: row.created_at,
            created_by: row.created_by,
            track_clicks: row.track_clicks,
            redirect_count: row.redirect_count,
        }
    }
}

/// PostgreSQL repository for short links.
///
/// Slug uniqueness is enforced by the `short_links_slug_key` unique index, and
/// the redirect counter is bumped with a single `UPDATE ... + 1`.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let slug = new_link.slug.clone();

        let row = sqlx::query_as::<_, ShortLinkRow>(&format!(
            r#"
            INSERT INTO short_links
                (slug, destination, expire_at, utm, created_at, created_by, track_clicks)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(new_link.slug)
        .bind(new_link.destination)
        .bind(new_link.expire_at)
        .bind(Json(new_link.utm))
        .bind(new_link.created_at)
        .bind(new_link.created_by)
        .bind(new_link.track_clicks)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, &slug))?;

        Ok(row.into())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM short_links WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, slug))?;

        Ok(row.map(Into::into))
    }

    async fn increment_redirect_count(&self, slug: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE short_links SET redirect_count = redirect_count + 1 WHERE slug = $1")
                .bind(slug)
                .execute(self.pool.as_ref())
                .await
                .map_err(|e| map_sqlx_error(e, slug))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_owner(&self, query: OwnerQuery) -> Result<Vec<ShortLink>, AppError> {
        let rows = sqlx::query_as::<_, ShortLinkRow>(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM short_links
            WHERE created_by = $1
              AND ($2 OR expire_at IS NULL OR expire_at > $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(&query.owner)
        .bind(query.include_expired)
        .bind(query.now)
        .bind(i64::from(query.page_size))
        .bind(query.sql_offset())
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, &query.owner))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
