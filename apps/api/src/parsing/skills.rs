#![allow(dead_code)]

//! Skill catalog and catalog-driven skill extraction.
//!
//! The catalog is loaded once at startup and shared read-only (via `Arc`) by
//! the parser. Matching is a whole-word, case-insensitive search per catalog
//! entry. Entries carrying punctuation at a word edge ("c++", "c#") rarely
//! match because `\b` needs a word character on one side; that heuristic
//! limitation is kept as-is.

use std::fmt;
use std::path::Path;

use regex::Regex;
use serde::{Serialize, Serializer};
use tracing::{info, warn};

/// Sentinel rendered when no catalog skill appears in a document.
pub const NO_SKILLS_DETECTED: &str = "No skills detected";

struct CatalogEntry {
    phrase: String,
    pattern: Regex,
}

/// Ordered, lowercase skill phrases with their whole-word matchers precompiled.
#[derive(Default)]
pub struct SkillCatalog {
    entries: Vec<CatalogEntry>,
}

impl fmt::Debug for SkillCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkillCatalog")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl SkillCatalog {
    /// Builds a catalog from arbitrary phrases: trimmed, lowercased, blanks dropped.
    /// Catalog order is preserved, duplicates included.
    pub fn from_entries<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        for phrase in phrases {
            let phrase = phrase.as_ref().trim().to_lowercase();
            if phrase.is_empty() {
                continue;
            }
            match Regex::new(&format!(r"\b{}\b", regex::escape(&phrase))) {
                Ok(pattern) => entries.push(CatalogEntry { phrase, pattern }),
                Err(e) => warn!("Skipping skill '{phrase}': {e}"),
            }
        }
        Self { entries }
    }

    /// Loads a newline-delimited catalog file. A missing or unreadable file is
    /// not fatal; it yields an empty catalog.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let catalog = Self::from_entries(contents.lines());
                info!(
                    "Loaded {} skill(s) from {}",
                    catalog.len(),
                    path.display()
                );
                catalog
            }
            Err(e) => {
                warn!(
                    "Skills file not available at {} ({e}); skill extraction disabled",
                    path.display()
                );
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.phrase.as_str())
    }

    /// Title-cased catalog entries found in `text`, in catalog order, deduplicated.
    pub fn extract_skills(&self, text: &str) -> DetectedSkills {
        if self.entries.is_empty() {
            return DetectedSkills::NoneDetected;
        }

        let text_lower = text.to_lowercase();
        let mut found: Vec<String> = Vec::new();
        for entry in &self.entries {
            if entry.pattern.is_match(&text_lower) {
                let skill = title_case(&entry.phrase);
                if !found.contains(&skill) {
                    found.push(skill);
                }
            }
        }

        if found.is_empty() {
            DetectedSkills::NoneDetected
        } else {
            DetectedSkills::Found(found)
        }
    }
}

/// Result of skill extraction. `NoneDetected` is a distinct value rather than
/// an empty list so callers can tell "looked and found nothing" apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectedSkills {
    Found(Vec<String>),
    NoneDetected,
}

impl DetectedSkills {
    pub fn as_slice(&self) -> &[String] {
        match self {
            DetectedSkills::Found(skills) => skills,
            DetectedSkills::NoneDetected => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl fmt::Display for DetectedSkills {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectedSkills::Found(skills) => f.write_str(&skills.join(", ")),
            DetectedSkills::NoneDetected => f.write_str(NO_SKILLS_DETECTED),
        }
    }
}

/// Found skills serialize as an array, the empty result as the sentinel string.
impl Serialize for DetectedSkills {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DetectedSkills::Found(skills) => skills.serialize(serializer),
            DetectedSkills::NoneDetected => serializer.serialize_str(NO_SKILLS_DETECTED),
        }
    }
}

/// Upper-cases a letter when the preceding character is not a letter,
/// lower-cases it otherwise ("node.js" → "Node.Js", "3d" → "3D").
pub fn title_case(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len());
    let mut prev_is_letter = false;
    for c in phrase.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_catalog_order_is_kept() {
        let catalog = SkillCatalog::from_entries(["python", "sql"]);
        let skills = catalog.extract_skills("Built pipelines using Python and SQL daily.");
        assert_eq!(
            skills,
            DetectedSkills::Found(vec!["Python".to_string(), "Sql".to_string()])
        );
    }

    #[test]
    fn test_order_follows_catalog_not_text() {
        let catalog = SkillCatalog::from_entries(["sql", "python"]);
        let skills = catalog.extract_skills("Python first, then SQL.");
        assert_eq!(skills.as_slice(), ["Sql", "Python"]);
    }

    #[test]
    fn test_whole_word_only() {
        let catalog = SkillCatalog::from_entries(["java", "r"]);
        let skills = catalog.extract_skills("JavaScript developer, read more");
        assert_eq!(skills, DetectedSkills::NoneDetected);
    }

    #[test]
    fn test_multi_word_skill_matches() {
        let catalog = SkillCatalog::from_entries(["machine learning"]);
        let skills = catalog.extract_skills("Applied Machine Learning to fraud.");
        assert_eq!(skills.as_slice(), ["Machine Learning"]);
    }

    #[test]
    fn test_duplicates_removed() {
        let catalog = SkillCatalog::from_entries(["Python", "python ", "PYTHON"]);
        let skills = catalog.extract_skills("python python");
        assert_eq!(skills.as_slice(), ["Python"]);
    }

    #[test]
    fn test_punctuated_skill_under_matches() {
        let catalog = SkillCatalog::from_entries(["c++"]);
        let skills = catalog.extract_skills("Expert in C++ and Rust");
        assert_eq!(skills, DetectedSkills::NoneDetected);
    }

    #[test]
    fn test_empty_catalog_reports_sentinel() {
        let catalog = SkillCatalog::default();
        let skills = catalog.extract_skills("python sql rust");
        assert_eq!(skills, DetectedSkills::NoneDetected);
        assert_eq!(skills.to_string(), NO_SKILLS_DETECTED);
    }

    #[test]
    fn test_every_found_skill_occurs_in_text() {
        let catalog = SkillCatalog::from_entries(["rust", "go", "docker", "aws", "kafka"]);
        let text = "Rust services on AWS, deployed with Docker. Going places.";
        let text_lower = text.to_lowercase();
        for skill in catalog.extract_skills(text).as_slice() {
            let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&skill.to_lowercase()))).unwrap();
            assert!(pattern.is_match(&text_lower), "{skill} not in text");
        }
    }

    #[test]
    fn test_load_reads_file_and_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Python\n\n  SQL  \nDocker").unwrap();

        let catalog = SkillCatalog::load(file.path());
        assert_eq!(catalog.phrases().collect::<Vec<_>>(), ["python", "sql", "docker"]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let catalog = SkillCatalog::load(Path::new("/no/such/skills.txt"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_title_case_rules() {
        assert_eq!(title_case("sql"), "Sql");
        assert_eq!(title_case("node.js"), "Node.Js");
        assert_eq!(title_case("c++"), "C++");
        assert_eq!(title_case("3d modeling"), "3D Modeling");
    }

    #[test]
    fn test_serialize_found_and_sentinel() {
        let found = DetectedSkills::Found(vec!["Rust".to_string()]);
        assert_eq!(serde_json::to_string(&found).unwrap(), r#"["Rust"]"#);
        assert_eq!(
            serde_json::to_string(&DetectedSkills::NoneDetected).unwrap(),
            r#""No skills detected""#
        );
    }
}
