pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::parsing::handlers as parsing;
use crate::ranking::handlers as ranking;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Parsing API
        .route(
            "/api/v1/resumes/parse",
            post(parsing::handle_parse_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Ranking API
        .route("/api/v1/rank", post(ranking::handle_rank))
        .route("/api/v1/keywords", post(ranking::handle_keywords))
        .with_state(state)
}
