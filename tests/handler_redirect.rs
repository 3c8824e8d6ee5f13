mod common;

use axum::Router;
use axum::routing::get;
use axum_test::TestServer;
use linkcut::api::handlers::redirect_handler;
use sqlx::PgPool;

fn make_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    common::create_test_link(&pool, "go0001", "https://example.com/target").await;

    let server = make_server(pool);
    let response = server.get("/go0001").await;

    assert_eq!(response.status_code(), 302);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");

    // The redirect itself carries no page body.
    assert!(response.as_bytes().is_empty());
}

#[sqlx::test]
async fn test_redirect_records_visit(pool: PgPool) {
    common::create_test_link(&pool, "clickme", "https://example.com").await;

    let server = make_server(pool.clone());

    assert_eq!(common::fetch_clicks(&pool, "clickme").await, 0);
    assert!(common::fetch_last_clicked(&pool, "clickme").await.is_none());

    let response = server.get("/clickme").await;
    assert_eq!(response.status_code(), 302);

    assert_eq!(common::fetch_clicks(&pool, "clickme").await, 1);
    assert!(common::fetch_last_clicked(&pool, "clickme").await.is_some());
}

#[sqlx::test]
async fn test_repeated_visits_accumulate(pool: PgPool) {
    common::create_test_link(&pool, "multi01", "https://example.com").await;

    let server = make_server(pool.clone());

    for _ in 0..5 {
        server.get("/multi01").await;
    }

    assert_eq!(common::fetch_clicks(&pool, "multi01").await, 5);
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let server = make_server(pool.clone());

    let response = server.get("/zzzzzz").await;

    response.assert_status_not_found();

    // A miss never creates a record as a side effect.
    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_not_found_does_not_touch_other_links(pool: PgPool) {
    common::create_test_link(&pool, "keepme", "https://example.com").await;

    let server = make_server(pool.clone());
    server.get("/zzzzzz").await.assert_status_not_found();

    assert_eq!(common::fetch_clicks(&pool, "keepme").await, 0);
}
