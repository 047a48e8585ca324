//! HTTP-level tests for finance requests.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, seed_tender, seed_user, TestUser};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn file_request(app: axum::Router, user: &TestUser, tender_id: i64, kind: &str) -> Value {
    let response = post_json_auth(
        app,
        "/api/finance-requests",
        &user.token,
        json!({ "tenderId": tender_id, "requestType": kind, "amount": 2_500_000 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bidder_files_request_for_own_tender(pool: PgPool) {
    let bidder = seed_user(&pool, "bid", "bidder").await;
    let tender = seed_tender(&pool, "Bridge", Some(bidder.id)).await;
    let app = common::build_test_app(pool);

    let request = file_request(app, &bidder, tender.id, "EMD").await;
    assert_eq!(request["requestType"], "emd");
    assert_eq!(request["status"], "pending");
    assert_eq!(request["requestedBy"], bidder.id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_type_and_amount_are_rejected(pool: PgPool) {
    let manager = seed_user(&pool, "mgr", "manager").await;
    let tender = seed_tender(&pool, "Bridge", None).await;
    let app = common::build_test_app(pool);

    for body in [
        json!({ "tenderId": tender.id, "requestType": "bribe", "amount": 100 }),
        json!({ "tenderId": tender.id, "requestType": "pbg", "amount": 0 }),
    ] {
        let response =
            post_json_auth(app.clone(), "/api/finance-requests", &manager.token, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn approve_then_complete(pool: PgPool) {
    let finance = seed_user(&pool, "fin", "finance").await;
    let manager = seed_user(&pool, "mgr", "manager").await;
    let tender = seed_tender(&pool, "Bridge", None).await;
    let app = common::build_test_app(pool);

    let request = file_request(app.clone(), &manager, tender.id, "pbg").await;
    let id = request["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        &format!("/api/finance-requests/{id}/complete"),
        &finance.token,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/finance-requests/{id}/approve"),
        &finance.token,
        json!({ "remarks": "Bank guarantee arranged" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");
    assert_eq!(json["data"]["decidedBy"], finance.id);
    assert_eq!(json["data"]["remarks"], "Bank guarantee arranged");

    let response = post_json_auth(
        app,
        &format!("/api/finance-requests/{id}/complete"),
        &finance.token,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "completed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_admin_or_finance_decide(pool: PgPool) {
    let manager = seed_user(&pool, "mgr", "manager").await;
    let tender = seed_tender(&pool, "Bridge", None).await;
    let app = common::build_test_app(pool);

    let request = file_request(app.clone(), &manager, tender.id, "tender_fee").await;
    let response = post_json_auth(
        app,
        &format!("/api/finance-requests/{}/reject", request["id"]),
        &manager.token,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_filters_and_scopes_bidders(pool: PgPool) {
    let admin = seed_user(&pool, "admin", "admin").await;
    let bidder = seed_user(&pool, "bid", "bidder").await;
    let mine = seed_tender(&pool, "Mine", Some(bidder.id)).await;
    let other = seed_tender(&pool, "Other", None).await;
    let app = common::build_test_app(pool);

    file_request(app.clone(), &bidder, mine.id, "emd").await;
    file_request(app.clone(), &admin, other.id, "pbg").await;
    file_request(app.clone(), &admin, other.id, "emd").await;

    let json = body_json(get_auth(app.clone(), "/api/finance-requests", &admin.token).await).await;
    assert_eq!(json["pagination"]["total"], 3);

    let json = body_json(
        get_auth(app.clone(), "/api/finance-requests?type=emd&limit=1", &admin.token).await,
    )
    .await;
    assert_eq!(json["pagination"]["total"], 2);
    assert_eq!(json["pagination"]["totalPages"], 2);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json = body_json(
        get_auth(
            app.clone(),
            &format!("/api/finance-requests?tenderId={}", other.id),
            &admin.token,
        )
        .await,
    )
    .await;
    assert_eq!(json["pagination"]["total"], 2);

    let response = get_auth(
        app.clone(),
        "/api/finance-requests?tenderId=abc&status=bogus&page=x",
        &admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["pagination"]["total"], 3);

    let json = body_json(get_auth(app, "/api/finance-requests", &bidder.token).await).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["tenderId"], mine.id);
}
