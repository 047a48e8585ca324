#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use bidtrack_ai::{AiClient, AiConfig};
use bidtrack_api::auth::jwt::{generate_access_token, JwtConfig};
use bidtrack_api::auth::password::hash_password;
use bidtrack_api::config::ServerConfig;
use bidtrack_api::router::build_app_router;
use bidtrack_api::state::AppState;
use bidtrack_core::types::DbId;
use bidtrack_db::models::tender::{CreateTender, Tender};
use bidtrack_db::models::user::CreateUser;
use bidtrack_db::repositories::{RoleRepo, TenderRepo, UserRepo};

/// Plaintext password given to every seeded user.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
///
/// Each call gets its own upload directory under the system temp dir so
/// parallel tests never share files.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 7,
        },
        upload_dir: test_upload_dir(),
        max_upload_bytes: 64 * 1024,
        ai: None,
    }
}

fn test_upload_dir() -> PathBuf {
    std::env::temp_dir().join(format!("bidtrack-test-{}", uuid::Uuid::new_v4()))
}

/// Build the full application router, using the given database pool and
/// no AI client.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(pool, test_config())
}

/// Build the application with the AI client pointed at `ai_base_url`
/// (e.g. a wiremock server's `/v1`).
pub fn build_test_app_with_ai(pool: PgPool, ai_base_url: &str) -> Router {
    let mut config = test_config();
    config.ai = Some(AiConfig::with_url(ai_base_url));
    build_app(pool, config)
}

pub fn build_app(pool: PgPool, config: ServerConfig) -> Router {
    let ai = config
        .ai
        .as_ref()
        .map(|c| Arc::new(AiClient::new(c).expect("AI client should build")));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ai,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// A seeded user plus a valid access token for it.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: DbId,
    pub username: String,
    pub token: String,
}

/// Insert a user with the given role name and mint an access token.
pub async fn seed_user(pool: &PgPool, username: &str, role: &str) -> TestUser {
    let role_row = RoleRepo::find_by_name(pool, role)
        .await
        .unwrap()
        .expect("role should be seeded by migrations");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            full_name: None,
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role_id: role_row.id,
        },
    )
    .await
    .expect("user creation should succeed");

    let token = generate_access_token(user.id, role, &test_config().jwt).unwrap();
    TestUser {
        id: user.id,
        username: user.username,
        token,
    }
}

/// Insert a tender directly, optionally assigned to `assignee`.
pub async fn seed_tender(pool: &PgPool, title: &str, assignee: Option<DbId>) -> Tender {
    let input = CreateTender {
        title: title.to_string(),
        organization: "PWD Kerala".to_string(),
        value: Some(500_000),
        ..Default::default()
    };
    let tender = TenderRepo::create(pool, &input, None).await.unwrap();
    match assignee {
        Some(user_id) => TenderRepo::assign(pool, tender.id, Some(user_id), user_id, None)
            .await
            .unwrap()
            .unwrap(),
        None => tender,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a request with an optional bearer token and JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Multipart boundary used by [`post_multipart_auth`].
const BOUNDARY: &str = "bidtrack-test-boundary";

/// Upload one file field (plus optional text fields) as multipart/form-data.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
    fields: &[(&str, &str)],
) -> Response<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Spreadsheet fixtures
// ---------------------------------------------------------------------------

const XLSX_CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const XLSX_ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const XLSX_WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Tenders" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const XLSX_WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// Build a single-sheet `.xlsx` in memory. Cells that parse as numbers are
/// written as numeric cells, empty strings are left out, everything else
/// becomes an inline string. At most 26 columns.
pub fn xlsx_workbook(rows: &[&[&str]]) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    let mut sheet = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        let row_number = r + 1;
        sheet.push_str(&format!(r#"<row r="{row_number}">"#));
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let cell_ref = format!("{}{row_number}", (b'A' + c as u8) as char);
            if value.parse::<f64>().is_ok() {
                sheet.push_str(&format!(r#"<c r="{cell_ref}"><v>{value}</v></c>"#));
            } else {
                sheet.push_str(&format!(
                    r#"<c r="{cell_ref}" t="inlineStr"><is><t>{value}</t></is></c>"#
                ));
            }
        }
        sheet.push_str("</row>");
    }
    sheet.push_str("</sheetData></worksheet>");

    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, content) in [
        ("[Content_Types].xml", XLSX_CONTENT_TYPES),
        ("_rels/.rels", XLSX_ROOT_RELS),
        ("xl/workbook.xml", XLSX_WORKBOOK),
        ("xl/_rels/workbook.xml.rels", XLSX_WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", sheet.as_str()),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}
