mod common;

use axum_test::TestServer;
use serde_json::Value;
use shorty::routes::router;
use sqlx::PgPool;

async fn seed(pool: &PgPool, visits: usize) {
    let link_id = common::create_test_link(pool, "seeded", "https://example.com").await;
    for i in 0..visits {
        common::create_test_visit(pool, link_id, &format!("10.0.0.{i}")).await;
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_visits_pages(pool: PgPool) {
    seed(&pool, 12).await;
    let server = TestServer::new(router(common::create_test_state(pool))).unwrap();

    let first = server
        .get("/api/link_visits")
        .add_header("Range", "[0,10]")
        .await;
    first.assert_status_ok();
    assert_eq!(first.header("content-range"), "link_visits 0-9/12");
    assert_eq!(first.json::<Vec<Value>>().len(), 10);

    let again = server
        .get("/api/link_visits")
        .add_header("Range", "[0,10]")
        .await;
    assert_eq!(again.header("content-range"), "link_visits 0-9/12");

    let tail = server
        .get("/api/link_visits")
        .add_query_param("range", "[10,19]")
        .await;
    assert_eq!(tail.header("content-range"), "link_visits 10-11/12");
    assert_eq!(tail.json::<Vec<Value>>().len(), 2);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_visits_invalid_range(pool: PgPool) {
    let server = TestServer::new(router(common::create_test_state(pool))).unwrap();

    let response = server
        .get("/api/link_visits")
        .add_header("Range", "[5,2]")
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_visits_empty(pool: PgPool) {
    let server = TestServer::new(router(common::create_test_state(pool))).unwrap();

    let response = server.get("/api/link_visits").await;

    response.assert_status_ok();
    assert_eq!(response.header("content-range"), "link_visits */0");
}
