use serde::{Deserialize, Serialize};

use crate::parsing::skills::{DetectedSkills, NO_SKILLS_DETECTED};

/// Candidate skills as handed over by the caller: either a list or a single
/// comma-joined string (how the parser's output is usually stored).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillsList {
    Many(Vec<String>),
    Joined(String),
}

impl Default for SkillsList {
    fn default() -> Self {
        SkillsList::Many(Vec::new())
    }
}

impl SkillsList {
    /// Lowercased, trimmed, non-empty entries. The "No skills detected"
    /// sentinel normalises to nothing.
    pub fn normalized(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            SkillsList::Many(items) => items.iter().map(String::as_str).collect(),
            SkillsList::Joined(joined) => joined.split(',').collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty() && s != &NO_SKILLS_DETECTED.to_lowercase())
            .collect()
    }
}

impl From<&DetectedSkills> for SkillsList {
    fn from(skills: &DetectedSkills) -> Self {
        SkillsList::Many(skills.as_slice().to_vec())
    }
}

impl From<Vec<String>> for SkillsList {
    fn from(items: Vec<String>) -> Self {
        SkillsList::Many(items)
    }
}

impl From<&str> for SkillsList {
    fn from(joined: &str) -> Self {
        SkillsList::Joined(joined.to_string())
    }
}

/// One candidate in a ranking batch. `id` is opaque to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingInput {
    pub id: String,
    pub raw_text: String,
    #[serde(default)]
    pub skills_list: SkillsList,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub lexical_score: f64,
    pub skill_match: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    pub id: String,
    pub final_score: f64,
    pub components: ScoreComponents,
}

/// Tunables for one ranking call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingOptions {
    /// How many of the job description's heaviest terms count as prominent.
    pub top_job_terms: usize,
    /// Weight of the lexical score; `1 - alpha` goes to skill overlap.
    pub alpha: f64,
    /// Vocabulary cap for the per-call vector space.
    pub max_features: usize,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            top_job_terms: 30,
            alpha: 0.7,
            max_features: 1000,
        }
    }
}
