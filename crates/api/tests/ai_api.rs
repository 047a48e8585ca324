//! HTTP-level tests for the AI endpoints against a mocked completion API.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json_auth, seed_tender, seed_user};
use serde_json::{json, Value};
use sqlx::PgPool;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop",
        }],
    })
}

async fn mock_answer(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
        .mount(server)
        .await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn analyze_relays_model_json_unchanged(pool: PgPool) {
    let server = MockServer::start().await;
    mock_answer(&server, r#"{"score": 78, "summary": "Strong fit", "risks": ["tight deadline"]}"#)
        .await;
    let user = seed_user(&pool, "bid", "bidder").await;
    let app = common::build_test_app_with_ai(pool, &format!("{}/v1", server.uri()));

    let response = post_json_auth(
        app,
        "/api/ai/analyze-tender",
        &user.token,
        json!({ "title": "Road resurfacing", "organization": "PWD Kerala" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "score": 78, "summary": "Strong fit", "risks": ["tight deadline"] })
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn prose_answer_is_wrapped(pool: PgPool) {
    let server = MockServer::start().await;
    mock_answer(&server, "Dear Sir, we are pleased to submit our bid.").await;
    let user = seed_user(&pool, "bid", "bidder").await;
    let app = common::build_test_app_with_ai(pool, &format!("{}/v1", server.uri()));

    let response = post_json_auth(
        app,
        "/api/ai/generate-bid",
        &user.token,
        json!({ "title": "Road resurfacing", "section": "cover letter" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "content": "Dear Sir, we are pleased to submit our bid." })
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn disabled_ai_is_unavailable(pool: PgPool) {
    let user = seed_user(&pool, "bid", "bidder").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/ai/risk-assessment",
        &user.token,
        json!({ "title": "Road resurfacing" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["code"], "SERVICE_UNAVAILABLE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upstream_failure_is_bad_gateway(pool: PgPool) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&server)
        .await;
    let user = seed_user(&pool, "bid", "bidder").await;
    let app = common::build_test_app_with_ai(pool, &format!("{}/v1", server.uri()));

    let response = post_json_auth(
        app,
        "/api/ai/pricing-suggestion",
        &user.token,
        json!({ "title": "Road resurfacing", "estimatedValue": 5_000_000 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "AI_SERVICE_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_title_fails_validation_before_upstream(pool: PgPool) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("{}")))
        .expect(0)
        .mount(&server)
        .await;
    let user = seed_user(&pool, "bid", "bidder").await;
    let app = common::build_test_app_with_ai(pool, &format!("{}/v1", server.uri()));

    let response =
        post_json_auth(app, "/api/ai/analyze-tender", &user.token, json!({ "title": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn score_tender_persists_clamped_score(pool: PgPool) {
    let server = MockServer::start().await;
    mock_answer(&server, r#"{"compatibilityScore": 140, "summary": "Perfect"}"#).await;
    let manager = seed_user(&pool, "mgr", "manager").await;
    let tender = seed_tender(&pool, "Road resurfacing", None).await;
    let app = common::build_test_app_with_ai(pool, &format!("{}/v1", server.uri()));

    let response = post_json_auth(
        app,
        &format!("/api/tenders/{}/ai-score", tender.id),
        &manager.token,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["tender"]["aiScore"], 100);
    assert_eq!(json["data"]["analysis"]["summary"], "Perfect");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn score_without_number_leaves_tender_unchanged(pool: PgPool) {
    let server = MockServer::start().await;
    mock_answer(&server, "I cannot score this tender.").await;
    let manager = seed_user(&pool, "mgr", "manager").await;
    let tender = seed_tender(&pool, "Road resurfacing", None).await;
    let app = common::build_test_app_with_ai(pool, &format!("{}/v1", server.uri()));

    let response = post_json_auth(
        app,
        &format!("/api/tenders/{}/ai-score", tender.id),
        &manager.token,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["tender"]["aiScore"].is_null());
}
