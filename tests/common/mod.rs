#![allow(dead_code)]

use chrono::{DateTime, Utc};
use linkcut::application::services::LinkService;
use linkcut::infrastructure::persistence::PgLinkRepository;
use linkcut::state::AppState;
use linkcut::utils::code_generator::CodeGenerator;
use sqlx::PgPool;
use std::sync::Arc;

pub fn create_test_state(pool: PgPool) -> AppState {
    let link_repository = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let generator = CodeGenerator::with_seed(6, 42);

    AppState::new(Arc::new(LinkService::new(link_repository, generator, 10)))
}

pub async fn create_test_link(pool: &PgPool, code: &str, target: &str) {
    sqlx::query("INSERT INTO links (code, target) VALUES ($1, $2)")
        .bind(code)
        .bind(target)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_test_link_at(
    pool: &PgPool,
    code: &str,
    target: &str,
    created_at: DateTime<Utc>,
) {
    sqlx::query("INSERT INTO links (code, target, created_at) VALUES ($1, $2, $3)")
        .bind(code)
        .bind(target)
        .bind(created_at)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn fetch_clicks(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM links WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn fetch_last_clicked(pool: &PgPool, code: &str) -> Option<DateTime<Utc>> {
    sqlx::query_scalar("SELECT last_clicked FROM links WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}
