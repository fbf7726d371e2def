use std::sync::Arc;

use crate::config::Config;
use crate::parsing::parser::ResumeParser;
use crate::ranking::models::RankingOptions;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Parser holding the process-wide skill catalog.
    pub parser: Arc<ResumeParser>,
    /// Ranking defaults; requests may override `alpha` and `top_job_terms`.
    pub ranking: RankingOptions,
}
