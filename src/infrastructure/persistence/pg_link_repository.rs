//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkChanges, NewLink};
use crate::domain::repositories::{LinkRepository, StoreError};
use crate::utils::db_error::classify;

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    original_url: String,
    short_name: String,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(row.id, row.original_url, row.short_name)
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Code uniqueness is enforced by the `links_short_name_key` constraint, so
/// concurrent inserts of the same code race safely inside the database.
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
    async fn create(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (original_url, short_name)
            VALUES ($1, $2)
            RETURNING id, original_url, short_name
            "#,
        )
        .bind(new_link.original_url)
        .bind(new_link.short_name)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(classify)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            "SELECT id, original_url, short_name FROM links WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(classify)?;

        Ok(row.map(Link::from))
    }

    async fn find_by_short_name(&self, short_name: &str) -> Result<Option<Link>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            "SELECT id, original_url, short_name FROM links WHERE short_name = $1",
        )
        .bind(short_name)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(classify)?;

        Ok(row.map(Link::from))
    }

    async fn update(&self, id: i64, changes: LinkChanges) -> Result<Link, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET original_url = $2, short_name = $3
            WHERE id = $1
            RETURNING id, original_url, short_name
            "#,
        )
        .bind(id)
        .bind(changes.original_url)
        .bind(changes.short_name)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(classify)?;

        row.map(Link::from).ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await
            .map_err(classify)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(classify)
    }

    async fn list_all(&self) -> Result<Vec<Link>, StoreError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            "SELECT id, original_url, short_name FROM links ORDER BY id ASC",
        )
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(classify)?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn list_range(&self, offset: i64, limit: i64) -> Result<Vec<Link>, StoreError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, original_url, short_name
            FROM links
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(classify)?;

        Ok(rows.into_iter().map(Link::from).collect())
    }
}
