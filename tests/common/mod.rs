#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use shorty::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};
use shorty::state::AppState;

pub const BASE_URL: &str = "http://localhost:8080";

pub async fn create_test_link(pool: &PgPool, short_name: &str, url: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO links (original_url, short_name) VALUES ($1, $2) RETURNING id",
    )
    .bind(url)
    .bind(short_name)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_visit(pool: &PgPool, link_id: i64, ip: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO link_visits (link_id, ip, user_agent, referer, status) VALUES ($1, $2, 'test-agent', '', 302) RETURNING id",
    )
    .bind(link_id)
    .bind(ip)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with_proxy(pool, false)
}

pub fn create_test_state_with_proxy(pool: PgPool, behind_proxy: bool) -> AppState {
    let pool = Arc::new(pool);

    let link_repo = Arc::new(PgLinkRepository::new(pool.clone()));
    let visit_repo = Arc::new(PgVisitRepository::new(pool));

    AppState::new(link_repo, visit_repo, BASE_URL, behind_proxy)
}
