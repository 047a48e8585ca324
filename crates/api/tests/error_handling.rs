//! Checks that each error variant maps to the documented status and JSON
//! body.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bidtrack_api::error::AppError;
use bidtrack_core::error::CoreError;
use http_body_util::BodyExt;
use serde_json::Value;

async fn render(err: AppError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn not_found_names_entity_and_id() {
    let (status, body) = render(AppError::Core(CoreError::NotFound {
        entity: "Tender",
        id: 42,
    }))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["error"], "Tender with id 42 not found");
}

#[tokio::test]
async fn client_errors_keep_their_message() {
    let cases = [
        (
            AppError::BadRequest("Missing required 'file' field".into()),
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
        ),
        (
            AppError::Core(CoreError::Validation("amount must be greater than zero".into())),
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
        ),
        (
            AppError::Core(CoreError::Conflict("already pending".into())),
            StatusCode::CONFLICT,
            "CONFLICT",
        ),
        (
            AppError::PayloadTooLarge("limit is 64 KiB".into()),
            StatusCode::PAYLOAD_TOO_LARGE,
            "PAYLOAD_TOO_LARGE",
        ),
        (
            AppError::Core(CoreError::Unavailable("AI is off".into())),
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
        ),
        (
            AppError::Core(CoreError::Forbidden("admins only".into())),
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
        ),
    ];

    for (err, expected_status, expected_code) in cases {
        let message = match &err {
            AppError::BadRequest(m) | AppError::PayloadTooLarge(m) => m.clone(),
            AppError::Core(
                CoreError::Validation(m)
                | CoreError::Conflict(m)
                | CoreError::Unavailable(m)
                | CoreError::Forbidden(m),
            ) => m.clone(),
            other => panic!("unexpected case {other:?}"),
        };
        let (status, body) = render(err).await;
        assert_eq!(status, expected_status);
        assert_eq!(body["code"], expected_code);
        assert_eq!(body["error"], message);
    }
}

#[tokio::test]
async fn internal_details_are_hidden() {
    let (status, body) =
        render(AppError::InternalError("disk on fire at /var/uploads".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_ERROR");
    assert_eq!(body["error"], "An internal error occurred");

    let (status, body) = render(AppError::Core(CoreError::Internal("secret".into()))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_matches!(body["error"].as_str(), Some("An internal error occurred"));
}

#[tokio::test]
async fn row_not_found_is_404() {
    let (status, body) = render(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
