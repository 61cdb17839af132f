//! Section listing and statistics API tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL before running.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;

use common::fixtures;
use common::TestContext;

/// Test sections listing shows bank metadata and zeroed progress for a
/// fresh user.
#[tokio::test]
#[ignore = "requires database"]
async fn test_sections_fresh_user() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let response = server
        .get("/api/sections")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let sections = body["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 2);

    // Ordered by block, then section: quant/mental-math first.
    assert_eq!(sections[0]["section"], "mental-math");
    assert_eq!(sections[0]["question_count"], 3);
    assert_eq!(sections[0]["answered"], 0);
    assert_eq!(sections[0]["position"], 0);
    assert_eq!(sections[0]["content_hash"].as_str().unwrap().len(), 64);

    ctx.cleanup_user(user_id).await;
}

/// Test sections listing respects the block filter.
#[tokio::test]
#[ignore = "requires database"]
async fn test_sections_block_filter() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let response = server
        .get("/api/sections?block=trading")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let sections = body["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["section"], "order-basics");

    ctx.cleanup_user(user_id).await;
}

/// Test unknown block filter is a bad request.
#[tokio::test]
#[ignore = "requires database"]
async fn test_sections_unknown_block() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let response = server
        .get("/api/sections?block=crypto")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    ctx.cleanup_user(user_id).await;
}

/// Test answering moves counts, position and block stats.
#[tokio::test]
#[ignore = "requires database"]
async fn test_progress_after_answers() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    // One correct, one wrong.
    for (number, answer) in [(1, "391"), (2, "0.5")] {
        let _ = server
            .post("/api/practice/answer")
            .add_header(
                axum::http::header::AUTHORIZATION,
                TestContext::auth_header_value(&token),
            )
            .json(&fixtures::submit_answer_request("mental-math", number, answer))
            .await;
    }

    let response = server
        .get("/api/sections?block=quant")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;
    let body: serde_json::Value = response.json();
    let section = &body["sections"][0];
    assert_eq!(section["answered"], 2);
    assert_eq!(section["correct"], 1);
    assert_eq!(section["position"], 2);

    let response = server
        .get("/api/stats/quant")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total_answered"], 2);
    assert_eq!(body["total_correct"], 1);
    assert_eq!(body["answered_today"], 2);
    assert!((body["accuracy"].as_f64().unwrap() - 0.5).abs() < 1e-9);

    ctx.cleanup_user(user_id).await;
}

/// Test stats for an unknown block are rejected.
#[tokio::test]
#[ignore = "requires database"]
async fn test_stats_unknown_block() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let response = server
        .get("/api/stats/crypto")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    ctx.cleanup_user(user_id).await;
}
