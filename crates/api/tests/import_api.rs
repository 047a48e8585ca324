//! HTTP-level tests for the spreadsheet import.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_multipart_auth, seed_user};
use serde_json::json;
use sqlx::PgPool;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[sqlx::test(migrations = "../db/migrations")]
async fn workbook_rows_become_published_tenders(pool: PgPool) {
    let manager = seed_user(&pool, "mgr", "manager").await;
    let app = common::build_test_app(pool);

    let workbook = common::xlsx_workbook(&[
        &["Tender Title", "Organisation", "Tender Value", "Currency", "Bid End Date", "Source"],
        &["Road Construction", "PWD Kerala", "5000", "", "15-01-2099", "GeM"],
        &["", "NHAI", "100"],
        &["Canal lining", "Irrigation Dept", "1250.5", "Rupees"],
        &["Street lights", "KSEB"],
    ]);
    let response = post_multipart_auth(
        app.clone(),
        "/api/tenders/import",
        &manager.token,
        "tenders.xlsx",
        XLSX_MIME,
        &workbook,
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await["data"].clone();
    assert_eq!(report["imported"], 2);
    assert_eq!(
        report["skipped"],
        json!([
            { "row": 3, "reason": "missing title" },
            { "row": 4, "reason": "invalid currency" },
        ])
    );

    let json = body_json(get_auth(app.clone(), "/api/tenders?search=road", &manager.token).await)
        .await;
    let road = &json["data"][0];
    assert_eq!(road["title"], "Road Construction");
    assert_eq!(road["value"], 500_000);
    assert_eq!(road["formattedValue"], "₹5,000.00");
    assert_eq!(road["currency"], "INR");
    assert_eq!(road["status"], "published");
    assert_eq!(road["source"], "gem");
    assert_eq!(road["createdBy"], manager.id);

    let json = body_json(get_auth(app, "/api/tenders?search=street", &manager.token).await).await;
    let lights = &json["data"][0];
    assert_eq!(lights["value"], 0);
    assert_eq!(lights["status"], "published");
    assert_eq!(lights["source"], "portal");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_spreadsheet_is_rejected(pool: PgPool) {
    let manager = seed_user(&pool, "mgr", "manager").await;
    let app = common::build_test_app(pool);

    let response = post_multipart_auth(
        app,
        "/api/tenders/import",
        &manager.token,
        "tenders.pdf",
        "application/pdf",
        b"%PDF-1.4",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unreadable_workbook_is_rejected(pool: PgPool) {
    let manager = seed_user(&pool, "mgr", "manager").await;
    let app = common::build_test_app(pool);

    let response = post_multipart_auth(
        app,
        "/api/tenders/import",
        &manager.token,
        "tenders.xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        b"definitely not a zip archive",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bidders_cannot_import(pool: PgPool) {
    let bidder = seed_user(&pool, "bid", "bidder").await;
    let app = common::build_test_app(pool);

    let response = post_multipart_auth(
        app,
        "/api/tenders/import",
        &bidder.token,
        "tenders.xlsx",
        "application/octet-stream",
        b"PK",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
