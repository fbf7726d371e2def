//! Axum route handlers for the Ranking API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::ranking::models::{RankingInput, RankingOptions, RankingResult};
use crate::ranking::ranker::{rank_with_terms, top_keywords};
use crate::state::AppState;

const DEFAULT_KEYWORD_COUNT: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub job_description: String,
    pub candidates: Vec<RankingInput>,
    pub top_job_terms: Option<usize>,
    pub alpha: Option<f64>,
}

/// A ranking result plus its display percentage (score × 100, 2 decimals).
#[derive(Debug, Serialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub result: RankingResult,
    pub display_percent: f64,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub job_terms: Vec<String>,
    pub results: Vec<RankedCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub text: String,
    pub n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/rank
///
/// Ranks the submitted candidates against one job description. An empty batch
/// or description is a valid request with an empty ranking.
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let options = resolve_options(&state.ranking, &request)?;

    let ranking = rank_with_terms(&request.candidates, &request.job_description, &options);
    let results = ranking
        .results
        .into_iter()
        .map(|result| RankedCandidate {
            display_percent: (result.final_score * 10_000.0).round() / 100.0,
            result,
        })
        .collect();

    Ok(Json(RankResponse {
        job_terms: ranking.job_terms,
        results,
    }))
}

/// POST /api/v1/keywords
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let n = request.n.unwrap_or(DEFAULT_KEYWORD_COUNT);
    let keywords = top_keywords(&request.text, n, state.ranking.max_features);
    Ok(Json(KeywordsResponse { keywords }))
}

fn resolve_options(defaults: &RankingOptions, request: &RankRequest) -> Result<RankingOptions, AppError> {
    let alpha = request.alpha.unwrap_or(defaults.alpha);
    if !(0.0..=1.0).contains(&alpha) {
        return Err(AppError::Validation(format!(
            "alpha must be within [0, 1], got {alpha}"
        )));
    }
    Ok(RankingOptions {
        alpha,
        top_job_terms: request.top_job_terms.unwrap_or(defaults.top_job_terms),
        max_features: defaults.max_features,
    })
}
