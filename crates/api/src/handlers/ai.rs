//! AI-assist endpoints.
//!
//! The four `/ai/*` handlers are stateless proxies: validate the request,
//! forward the built prompt, relay the model's JSON unchanged. Scoring a
//! stored tender is the one call that persists anything.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use bidtrack_ai::output::extract_score;
use bidtrack_ai::prompts::{
    AnalyzeTenderRequest, BuildPrompt, GenerateBidRequest, PricingSuggestionRequest,
    RiskAssessmentRequest,
};
use bidtrack_ai::AiClient;
use bidtrack_core::activity::ACTION_AI_SCORED;
use bidtrack_core::error::CoreError;
use bidtrack_core::types::DbId;
use bidtrack_db::models::tender::{Tender, TenderResponse};
use bidtrack_db::repositories::TenderRepo;
use serde::Serialize;
use serde_json::{json, Value};
use validator::Validate;

use super::record_activity;
use super::tenders::{load_visible, not_found};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for `POST /tenders/{id}/ai-score`.
#[derive(Debug, Serialize)]
pub struct AiScoreResponse {
    pub tender: TenderResponse,
    /// The model's answer as relayed by the analyze endpoint.
    pub analysis: Value,
}

/// POST /api/ai/analyze-tender
pub async fn analyze_tender(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<AnalyzeTenderRequest>,
) -> AppResult<Json<Value>> {
    relay(&state, &user, "analyze-tender", &input).await
}

/// POST /api/ai/generate-bid
pub async fn generate_bid(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<GenerateBidRequest>,
) -> AppResult<Json<Value>> {
    relay(&state, &user, "generate-bid", &input).await
}

/// POST /api/ai/pricing-suggestion
pub async fn pricing_suggestion(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<PricingSuggestionRequest>,
) -> AppResult<Json<Value>> {
    relay(&state, &user, "pricing-suggestion", &input).await
}

/// POST /api/ai/risk-assessment
pub async fn risk_assessment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<RiskAssessmentRequest>,
) -> AppResult<Json<Value>> {
    relay(&state, &user, "risk-assessment", &input).await
}

/// POST /api/tenders/{id}/ai-score
///
/// Runs the tender analysis for a stored tender and persists the returned
/// score. An answer without a usable score leaves `aiScore` untouched.
pub async fn score_tender(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AiScoreResponse>>> {
    let client = require_client(&state)?;
    let tender = load_visible(&state, &user, id).await?;

    let analysis = client.run(&analysis_request(&tender)).await?;
    let tender = match extract_score(&analysis) {
        Some(score) => {
            let updated = TenderRepo::set_ai_score(&state.pool, id, score)
                .await?
                .ok_or(not_found(id))?;
            tracing::info!(tender_id = id, user_id = user.user_id, score, "Tender AI-scored");
            record_activity(
                &state,
                Some(id),
                user.user_id,
                ACTION_AI_SCORED,
                json!({ "score": score }),
            )
            .await;
            updated
        }
        None => {
            tracing::warn!(tender_id = id, "AI answer carried no score");
            tender
        }
    };

    Ok(Json(DataResponse {
        data: AiScoreResponse {
            tender: tender.into(),
            analysis,
        },
    }))
}

fn require_client(state: &AppState) -> AppResult<Arc<AiClient>> {
    state.ai.clone().ok_or_else(|| {
        CoreError::Unavailable("AI assistance is not configured on this server".into()).into()
    })
}

async fn relay<R>(
    state: &AppState,
    user: &AuthUser,
    endpoint: &str,
    input: &R,
) -> AppResult<Json<Value>>
where
    R: BuildPrompt + Validate,
{
    let client = require_client(state)?;
    input.validate()?;

    tracing::debug!(user_id = user.user_id, endpoint, model = client.model(), "AI request");
    let answer = client.run(input).await?;
    Ok(Json(answer))
}

fn analysis_request(tender: &Tender) -> AnalyzeTenderRequest {
    AnalyzeTenderRequest {
        title: tender.title.clone(),
        organization: Some(tender.organization.clone()),
        description: tender.description.clone(),
        category: tender.category.clone(),
        location: tender.location.clone(),
        value: Some(tender.value),
        deadline: tender.deadline.map(|d| d.format("%Y-%m-%d").to_string()),
        company_profile: None,
    }
}
