//! PostgreSQL implementation of the visit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{LinkVisit, NewLinkVisit};
use crate::domain::repositories::{StoreError, VisitRepository};
use crate::utils::db_error::classify;

#[derive(sqlx::FromRow)]
struct VisitRow {
    id: i64,
    link_id: i64,
    created_at: DateTime<Utc>,
    ip: String,
    user_agent: String,
    referer: String,
    status: i32,
}

impl From<VisitRow> for LinkVisit {
    fn from(row: VisitRow) -> Self {
        LinkVisit {
            id: row.id,
            link_id: row.link_id,
            created_at: row.created_at,
            ip: row.ip,
            user_agent: row.user_agent,
            referer: row.referer,
            status: row.status,
        }
    }
}

/// PostgreSQL repository for the visit log.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn record(&self, new_visit: NewLinkVisit) -> Result<LinkVisit, StoreError> {
        let row = sqlx::query_as::<_, VisitRow>(
            r#"
            INSERT INTO link_visits (link_id, ip, user_agent, referer, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, link_id, created_at, ip, user_agent, referer, status
            "#,
        )
        .bind(new_visit.link_id)
        .bind(new_visit.ip)
        .bind(new_visit.user_agent)
        .bind(new_visit.referer)
        .bind(new_visit.status)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(classify)?;

        Ok(row.into())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM link_visits")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(classify)
    }

    async fn list_range(&self, offset: i64, limit: i64) -> Result<Vec<LinkVisit>, StoreError> {
        let rows = sqlx::query_as::<_, VisitRow>(
            r#"
            SELECT id, link_id, created_at, ip, user_agent, referer, status
            FROM link_visits
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(classify)?;

        Ok(rows.into_iter().map(LinkVisit::from).collect())
    }
}
