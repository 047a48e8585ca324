//! HTTP-level tests for company and tender documents.

mod common;

use axum::http::{header, StatusCode};
use common::{
    body_bytes, body_json, delete_auth, get_auth, post_multipart_auth, seed_tender, seed_user,
};
use sqlx::PgPool;

const PDF_BYTES: &[u8] = b"%PDF-1.4\n% bidtrack test document\n%%EOF\n";

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_list_and_download_company_document(pool: PgPool) {
    let manager = seed_user(&pool, "mgr", "manager").await;
    let bidder = seed_user(&pool, "bid", "bidder").await;
    let app = common::build_test_app(pool);

    let response = post_multipart_auth(
        app.clone(),
        "/api/company-documents",
        &manager.token,
        "GST Certificate.pdf",
        "application/pdf",
        PDF_BYTES,
        &[("name", "GST certificate"), ("category", "registration")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let document = body_json(response).await["data"].clone();
    assert_eq!(document["name"], "GST certificate");
    assert_eq!(document["category"], "registration");
    assert_eq!(document["mimeType"], "application/pdf");
    assert_eq!(document["sizeBytes"], PDF_BYTES.len());
    assert!(document["tenderId"].is_null());

    let json = body_json(
        get_auth(app.clone(), "/api/company-documents?category=registration", &bidder.token).await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    let json = body_json(
        get_auth(app.clone(), "/api/company-documents?category=financial", &bidder.token).await,
    )
    .await;
    assert_eq!(json["data"], serde_json::json!([]));

    let response = get_auth(
        app,
        &format!("/api/company-documents/{}/download", document["id"]),
        &bidder.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"GST Certificate.pdf\""
    );
    assert_eq!(body_bytes(response).await, PDF_BYTES);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn name_defaults_to_file_name(pool: PgPool) {
    let manager = seed_user(&pool, "mgr", "manager").await;
    let app = common::build_test_app(pool);

    let response = post_multipart_auth(
        app,
        "/api/company-documents",
        &manager.token,
        "pan.pdf",
        "application/pdf",
        PDF_BYTES,
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["name"], "pan.pdf");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn disallowed_type_is_rejected(pool: PgPool) {
    let manager = seed_user(&pool, "mgr", "manager").await;
    let app = common::build_test_app(pool);

    let response = post_multipart_auth(
        app,
        "/api/company-documents",
        &manager.token,
        "setup.exe",
        "application/octet-stream",
        b"MZ",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn oversized_upload_is_rejected(pool: PgPool) {
    let manager = seed_user(&pool, "mgr", "manager").await;
    let app = common::build_test_app(pool);

    // test_config() caps uploads at 64 KiB.
    let big = vec![b'a'; 200 * 1024];
    let response = post_multipart_auth(
        app,
        "/api/company-documents",
        &manager.token,
        "huge.pdf",
        "application/pdf",
        &big,
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bidders_cannot_upload_company_documents(pool: PgPool) {
    let bidder = seed_user(&pool, "bid", "bidder").await;
    let app = common::build_test_app(pool);

    let response = post_multipart_auth(
        app,
        "/api/company-documents",
        &bidder.token,
        "pan.pdf",
        "application/pdf",
        PDF_BYTES,
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_admin_deletes(pool: PgPool) {
    let admin = seed_user(&pool, "admin", "admin").await;
    let manager = seed_user(&pool, "mgr", "manager").await;
    let app = common::build_test_app(pool);

    let response = post_multipart_auth(
        app.clone(),
        "/api/company-documents",
        &manager.token,
        "pan.pdf",
        "application/pdf",
        PDF_BYTES,
        &[],
    )
    .await;
    let uri = format!("/api/company-documents/{}", body_json(response).await["data"]["id"]);

    let response = delete_auth(app.clone(), &uri, &manager.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &uri, &admin.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &uri, &admin.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn tender_documents_follow_tender_visibility(pool: PgPool) {
    let bidder = seed_user(&pool, "bid", "bidder").await;
    let outsider = seed_user(&pool, "other", "bidder").await;
    let tender = seed_tender(&pool, "Bridge", Some(bidder.id)).await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/tenders/{}/documents", tender.id);

    let response = post_multipart_auth(
        app.clone(),
        &uri,
        &bidder.token,
        "boq.xlsx",
        "application/octet-stream",
        b"PK\x03\x04 not really a workbook",
        &[("category", "boq")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let document = body_json(response).await["data"].clone();
    assert_eq!(document["tenderId"], tender.id);

    let json = body_json(get_auth(app.clone(), &uri, &bidder.token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = get_auth(app.clone(), &uri, &outsider.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(
        app,
        &format!("/api/company-documents/{}", document["id"]),
        &outsider.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
