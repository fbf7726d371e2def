//! Single-value field extractors: name, email, phone.
//!
//! Each returns a sentinel string instead of failing when nothing is found.

use std::sync::LazyLock;

use regex::Regex;

pub const NOT_FOUND: &str = "Not found";
pub const UNKNOWN_NAME: &str = "Unknown";

/// How much of the document head the person recognizer looks at.
const NAME_SCAN_CHARS: usize = 1000;
const NAME_SCAN_LINES: usize = 6;
/// Fallback: how many leading lines may hold the name line.
const NAME_FALLBACK_LINES: usize = 6;
const NAME_LINE_MAX_CHARS: usize = 60;
const NAME_LINE_MAX_WORDS: usize = 4;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("email pattern is valid")
});

/// Phone formats in priority order; priority only matters for equal offsets.
static PHONE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // +91 98765 43210
        r"\+91[-.\s]?\d{5}[-.\s]?\d{5}",
        // 09876543210 / 9876543210
        r"\b0?\d{10}\b",
        // +1 (415) 555-0100, 020 7946 0958
        r"\+?\d{1,3}[-.\s]?\(?\d{3,5}\)?[-.\s]?\d{3,5}[-.\s]?\d{3,5}",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("phone pattern is valid"))
    .collect()
});

/// Named-entity seam for person names. Swap in a model-backed recognizer
/// without touching the parser.
pub trait PersonRecognizer: Send + Sync {
    /// First span in `text` recognised as a person's name.
    fn first_person(&self, text: &str) -> Option<String>;
}

/// Rule-based recognizer: the first run of two or three capitalised words on a
/// single line, none of which is common resume vocabulary.
#[derive(Debug, Default, Clone, Copy)]
pub struct CapitalizedNameRecognizer;

const NON_NAME_WORDS: &[&str] = &[
    "resume", "curriculum", "vitae", "cv", "profile", "summary", "objective", "contact",
    "education", "experience", "skills", "projects", "certifications", "work", "history",
    "employment", "professional", "technical", "personal", "details", "information",
    "references", "languages", "interests", "achievements", "awards", "university",
    "college", "institute", "school", "bachelor", "master", "science", "engineering",
    "senior", "junior", "lead", "software", "engineer", "developer", "manager", "analyst",
    "intern", "data", "scientist", "consultant", "email", "phone", "address", "linkedin",
    "github", "street", "road", "avenue",
];

/// "Priya", "O'Neil", "JOHN"; section words in any casing are rejected.
fn looks_like_name_token(token: &str) -> bool {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let capitalized = chars.all(|c| c.is_lowercase() || c == '-' || c == '\'' || c == '.');
    let all_caps = token.chars().any(char::is_alphabetic)
        && token
            .chars()
            .all(|c| c.is_uppercase() || c == '-' || c == '\'' || c == '.');

    first.is_uppercase()
        && token.chars().count() >= 2
        && (capitalized || all_caps)
        && !NON_NAME_WORDS.contains(&token.to_lowercase().trim_end_matches('.'))
}

impl PersonRecognizer for CapitalizedNameRecognizer {
    fn first_person(&self, text: &str) -> Option<String> {
        for line in text.lines() {
            let mut run: Vec<&str> = Vec::new();
            let tokens: Vec<&str> = line.split_whitespace().collect();

            for (idx, raw) in tokens.iter().enumerate() {
                let token = raw.trim_end_matches([',', ';', ':', '|']);
                let ends_run = token.len() != raw.len() || idx + 1 == tokens.len();

                if looks_like_name_token(token) {
                    run.push(token);
                } else {
                    if (2..=3).contains(&run.len()) {
                        return Some(run.join(" "));
                    }
                    run.clear();
                    continue;
                }

                if ends_run {
                    if (2..=3).contains(&run.len()) {
                        return Some(run.join(" "));
                    }
                    run.clear();
                }
            }
        }
        None
    }
}

/// Person name: recognizer over the top lines of the document, then a
/// "short top line" fallback, then `"Unknown"`.
pub fn extract_name(text: &str, recognizer: &dyn PersonRecognizer) -> String {
    let head: String = text.chars().take(NAME_SCAN_CHARS).collect();
    let head = head.lines().take(NAME_SCAN_LINES).collect::<Vec<_>>().join("\n");
    if let Some(name) = recognizer.first_person(&head) {
        let name = name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }

    for line in text.lines().take(NAME_FALLBACK_LINES) {
        let line = line.trim();
        let len = line.chars().count();
        let words = line.split_whitespace().count();
        if len > 0 && len <= NAME_LINE_MAX_CHARS && (1..=NAME_LINE_MAX_WORDS).contains(&words) {
            return line.to_string();
        }
    }

    UNKNOWN_NAME.to_string()
}

pub fn extract_email(text: &str) -> String {
    EMAIL_PATTERN
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string())
}

/// Phone number with the earliest start offset across all patterns.
/// On an offset tie the pattern listed first wins.
pub fn extract_phone(text: &str) -> String {
    let mut earliest: Option<regex::Match<'_>> = None;
    for pattern in PHONE_PATTERNS.iter() {
        if let Some(m) = pattern.find(text) {
            if earliest.map_or(true, |e| m.start() < e.start()) {
                earliest = Some(m);
            }
        }
    }
    earliest
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string())
}
