mod config;
mod errors;
mod parsing;
mod ranking;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::parsing::parser::ResumeParser;
use crate::parsing::skills::SkillCatalog;
use crate::ranking::models::RankingOptions;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Matcher v{}", env!("CARGO_PKG_VERSION"));

    // Skill catalog is loaded once and shared read-only; a missing file only
    // disables skill extraction
    let catalog = Arc::new(SkillCatalog::load(&config.skills_path));
    let parser = Arc::new(ResumeParser::new(catalog));

    let ranking = RankingOptions {
        top_job_terms: config.top_job_terms,
        alpha: config.ranking_alpha,
        max_features: config.max_features,
    };
    info!(
        "Ranking defaults: alpha={} top_job_terms={} max_features={}",
        ranking.alpha, ranking.top_job_terms, ranking.max_features
    );

    let state = AppState {
        config: config.clone(),
        parser,
        ranking,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
