//! Route definitions for the `/ai` proxy endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// Routes mounted at `/ai`.
///
/// ```text
/// POST /analyze-tender       -> analyze_tender
/// POST /generate-bid         -> generate_bid
/// POST /pricing-suggestion   -> pricing_suggestion
/// POST /risk-assessment      -> risk_assessment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze-tender", post(ai::analyze_tender))
        .route("/generate-bid", post(ai::generate_bid))
        .route("/pricing-suggestion", post(ai::pricing_suggestion))
        .route("/risk-assessment", post(ai::risk_assessment))
}
