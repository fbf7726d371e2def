use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Zero means the skills file was missing and skill extraction is off.
    pub skill_catalog_size: usize,
    pub ranking_alpha: f64,
    pub top_job_terms: usize,
    pub max_features: usize,
}

/// GET /health
/// Liveness plus the loaded catalog size and ranking defaults.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: if state.parser.catalog().is_empty() {
            "degraded"
        } else {
            "ok"
        },
        version: env!("CARGO_PKG_VERSION"),
        skill_catalog_size: state.parser.catalog().len(),
        ranking_alpha: state.ranking.alpha,
        top_job_terms: state.ranking.top_job_terms,
        max_features: state.ranking.max_features,
    })
}
