//! Ranking engine: orders a candidate batch by relevance to one job description.
//!
//! Two signals per candidate:
//! 1. `lexical_score`: cosine similarity between the job description and the
//!    candidate text in a TF-IDF space fitted on this batch alone
//! 2. `skill_match`: share of the job's prominent terms covered by the
//!    candidate's skill list
//!
//! `final_score = alpha * lexical_score + (1 - alpha) * skill_match`.
//!
//! The vector space depends on the whole batch, so scores from different
//! calls are not comparable and partial rankings must not be merged.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::ranking::models::{
    RankingInput, RankingOptions, RankingResult, ScoreComponents, SkillsList,
};
use crate::ranking::tfidf::{TfidfMatrix, VectorizeError};

/// Index of the job description inside the fitted corpus.
const JOB_ROW: usize = 0;

/// One ranking pass: the job's prominent terms and the ordered results, both
/// taken from the same fitted vector space.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    pub job_terms: Vec<String>,
    pub results: Vec<RankingResult>,
}

/// Ranks `candidates` against `job_description`, best first. Equal scores keep
/// input order. Empty input yields an empty ranking; a batch whose vector
/// space cannot be built yields every candidate at score 0 in input order.
pub fn rank_resumes(
    candidates: &[RankingInput],
    job_description: &str,
    options: &RankingOptions,
) -> Vec<RankingResult> {
    rank_with_terms(candidates, job_description, options).results
}

/// Same as [`rank_resumes`], also returning up to `options.top_job_terms`
/// prominent job terms that fed the skill-match signal.
pub fn rank_with_terms(
    candidates: &[RankingInput],
    job_description: &str,
    options: &RankingOptions,
) -> Ranking {
    if candidates.is_empty() || job_description.is_empty() {
        return Ranking::default();
    }

    match try_rank(candidates, job_description, options) {
        Ok(ranking) => ranking,
        Err(e) => {
            warn!("Error ranking {} resume(s): {e}", candidates.len());
            Ranking {
                job_terms: Vec::new(),
                results: zero_scores(candidates),
            }
        }
    }
}

fn try_rank(
    candidates: &[RankingInput],
    job_description: &str,
    options: &RankingOptions,
) -> Result<Ranking, VectorizeError> {
    let matrix = fit_corpus(candidates, job_description, options.max_features)?;
    let job_terms = job_terms(&matrix, options.top_job_terms);
    let prominent: HashSet<String> = job_terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .collect();
    debug!(
        "Ranking {} candidate(s) over {} term(s), {} prominent",
        candidates.len(),
        matrix.terms().len(),
        prominent.len()
    );

    let mut results: Vec<RankingResult> = candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let lexical_score = matrix.cosine(JOB_ROW, i + 1);
            let skill_match = skill_match(&candidate.skills_list, &prominent);
            RankingResult {
                id: candidate.id.clone(),
                final_score: combine(lexical_score, skill_match, options.alpha),
                components: ScoreComponents {
                    lexical_score,
                    skill_match,
                },
            }
        })
        .collect();

    // `sort_by` is stable: ties keep input order
    results.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    Ok(Ranking { job_terms, results })
}

/// Corpus is the job description followed by each candidate's text.
fn fit_corpus(
    candidates: &[RankingInput],
    job_description: &str,
    max_features: usize,
) -> Result<TfidfMatrix, VectorizeError> {
    let corpus: Vec<&str> = std::iter::once(job_description)
        .chain(candidates.iter().map(|c| c.raw_text.as_str()))
        .collect();
    TfidfMatrix::fit_transform(&corpus, max_features)
}

fn job_terms(matrix: &TfidfMatrix, n: usize) -> Vec<String> {
    matrix
        .top_terms(JOB_ROW, n)
        .into_iter()
        .map(|(term, _)| term)
        .collect()
}

/// |skills ∩ prominent| / |prominent|, in [0, 1]; 0 when either side is empty.
pub fn skill_match(skills: &SkillsList, prominent: &HashSet<String>) -> f64 {
    let skills: HashSet<String> = skills.normalized().into_iter().collect();
    if skills.is_empty() || prominent.is_empty() {
        return 0.0;
    }
    let overlap = skills.intersection(prominent).count();
    (overlap as f64 / prominent.len() as f64).clamp(0.0, 1.0)
}

/// Weighted blend of the two signals; anything non-finite collapses to 0.
pub fn combine(lexical_score: f64, skill_match: f64, alpha: f64) -> f64 {
    let score = alpha * lexical_score + (1.0 - alpha) * skill_match;
    if score.is_finite() {
        // + 0.0 folds -0.0 into 0.0
        score.clamp(0.0, 1.0) + 0.0
    } else {
        0.0
    }
}

fn zero_scores(candidates: &[RankingInput]) -> Vec<RankingResult> {
    candidates
        .iter()
        .map(|c| RankingResult {
            id: c.id.clone(),
            final_score: 0.0,
            components: ScoreComponents {
                lexical_score: 0.0,
                skill_match: 0.0,
            },
        })
        .collect()
}

/// Highest-weighted terms of a single document fitted on its own, best first.
/// Debug aid for explaining a match; the ranking path does not use it.
pub fn top_keywords(text: &str, n: usize, max_features: usize) -> Vec<String> {
    match TfidfMatrix::fit_transform(&[text], max_features) {
        Ok(matrix) => matrix
            .top_terms(0, n)
            .into_iter()
            .map(|(term, _)| term)
            .collect(),
        Err(e) => {
            debug!("No keywords extracted: {e}");
            Vec::new()
        }
    }
}
