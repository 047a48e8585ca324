use std::sync::Arc;

use bidtrack_ai::AiClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bidtrack_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Completion API client, present only when AI is configured.
    pub ai: Option<Arc<AiClient>>,
}
