//! Liveness endpoint, mounted at the root rather than under `/api`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    pub database: bool,
    /// The upload directory exists (or could be created) and is writable.
    pub upload_dir: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` when every check passes, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
    /// AI endpoints answer 503 when this is false. It does not degrade status.
    pub ai_enabled: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let checks = HealthChecks {
        database: bidtrack_db::health_check(&state.pool).await.is_ok(),
        upload_dir: upload_dir_writable(&state).await,
    };
    let status = if checks.database && checks.upload_dir {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks,
        ai_enabled: state.ai.is_some(),
    })
}

async fn upload_dir_writable(state: &AppState) -> bool {
    let dir = &state.config.upload_dir;
    if let Err(e) = tokio::fs::create_dir_all(dir).await {
        tracing::warn!(path = %dir.display(), error = %e, "Upload directory unavailable");
        return false;
    }
    match tokio::fs::metadata(dir).await {
        Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
        Err(_) => false,
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
