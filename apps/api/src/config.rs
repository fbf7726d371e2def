use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Resolved against the working directory, like every other relative path.
const DEFAULT_SKILLS_PATH: &str = "data/skills.txt";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub skills_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
    pub ranking_alpha: f64,
    pub top_job_terms: usize,
    pub max_features: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let ranking_alpha: f64 = parse_env("RANKING_ALPHA", 0.7)?;
        if !(0.0..=1.0).contains(&ranking_alpha) {
            bail!("RANKING_ALPHA must be within [0, 1], got {ranking_alpha}");
        }

        let max_features: usize = parse_env("MAX_FEATURES", 1000)?;
        if max_features == 0 {
            bail!("MAX_FEATURES must be greater than zero");
        }

        Ok(Config {
            skills_path: skills_path(std::env::var("SKILLS_PATH").ok()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ranking_alpha,
            top_job_terms: parse_env("TOP_JOB_TERMS", 30)?,
            max_features,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 16 * 1024 * 1024)?,
        })
    }
}

fn skills_path(raw: Option<String>) -> PathBuf {
    raw.filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SKILLS_PATH))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
