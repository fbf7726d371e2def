//! Section capture for education and experience blocks.
//!
//! A single pass over the lines with two states: seeking a heading, then
//! capturing. Capture ends on a line that mentions another section, on the
//! line ceiling, or at end of input.

use crate::parsing::fields::NOT_FOUND;

/// Keyword vocabulary and limits for one resume section.
#[derive(Debug, Clone, Copy)]
pub struct SectionRule {
    pub heading_keywords: &'static [&'static str],
    pub stop_keywords: &'static [&'static str],
    pub max_lines: usize,
}

pub const EDUCATION: SectionRule = SectionRule {
    heading_keywords: &[
        "education",
        "academic",
        "qualification",
        "degree",
        "university",
        "college",
        "bachelor",
        "master",
        "phd",
        "b.tech",
        "m.tech",
        "mba",
        "bca",
        "mca",
    ],
    stop_keywords: &[
        "experience",
        "work history",
        "projects",
        "skills",
        "certifications",
    ],
    max_lines: 12,
};

pub const EXPERIENCE: SectionRule = SectionRule {
    heading_keywords: &[
        "experience",
        "work history",
        "employment",
        "professional experience",
        "work experience",
    ],
    stop_keywords: &["education", "skills", "projects", "certifications"],
    max_lines: 20,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    SeekingHeading,
    Capturing,
}

/// Captures the section described by `rule`. The heading line itself is part
/// of the capture, and every captured line is trimmed. Returns `"Not found"`
/// when nothing was captured.
pub fn capture_section(text: &str, rule: &SectionRule) -> String {
    let mut state = CaptureState::SeekingHeading;
    let mut section: Vec<&str> = Vec::new();

    for line in text.lines() {
        let low = line.to_lowercase();

        if state == CaptureState::SeekingHeading
            && rule.heading_keywords.iter().any(|k| low.contains(k))
        {
            state = CaptureState::Capturing;
        }

        if state == CaptureState::SeekingHeading {
            continue;
        }

        if rule.stop_keywords.iter().any(|w| low.contains(w)) {
            break;
        }

        let trimmed = line.trim();
        if !trimmed.is_empty() {
            section.push(trimmed);
            if section.len() >= rule.max_lines {
                break;
            }
        }
    }

    if section.is_empty() {
        NOT_FOUND.to_string()
    } else {
        section.join("\n")
    }
}

pub fn extract_education(text: &str) -> String {
    capture_section(text, &EDUCATION)
}

pub fn extract_experience(text: &str) -> String {
    capture_section(text, &EXPERIENCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe
jane@example.com

EDUCATION
B.Tech in Computer Science, IIT Madras

  Graduated 2019, GPA 9.1

WORK EXPERIENCE
Data Engineer, Acme Corp (2019 - present)
Built streaming pipelines in Python

SKILLS
Python, SQL, Kafka
";

    #[test]
    fn test_education_stops_at_experience_heading() {
        assert_eq!(
            extract_education(RESUME),
            "EDUCATION\nB.Tech in Computer Science, IIT Madras\nGraduated 2019, GPA 9.1"
        );
    }

    #[test]
    fn test_experience_stops_at_skills_heading() {
        assert_eq!(
            extract_experience(RESUME),
            "WORK EXPERIENCE\nData Engineer, Acme Corp (2019 - present)\nBuilt streaming pipelines in Python"
        );
    }

    #[test]
    fn test_missing_heading_is_not_found() {
        assert_eq!(extract_education("Jane Doe\nLikes hiking"), NOT_FOUND);
        assert_eq!(extract_experience("Jane Doe\nLikes hiking"), NOT_FOUND);
    }

    #[test]
    fn test_eof_while_capturing_returns_capture() {
        let text = "Employment\nAcme Corp\nGlobex";
        assert_eq!(extract_experience(text), "Employment\nAcme Corp\nGlobex");
    }

    #[test]
    fn test_line_ceiling_applies() {
        let mut text = String::from("Experience\n");
        for i in 0..40 {
            text.push_str(&format!("Role {i}\n"));
        }
        let captured = extract_experience(&text);
        assert_eq!(captured.lines().count(), EXPERIENCE.max_lines);
        assert!(captured.starts_with("Experience\nRole 0"));

        let mut text = String::from("Education\n");
        for i in 0..40 {
            text.push_str(&format!("Course {i}\n"));
        }
        assert_eq!(extract_education(&text).lines().count(), EDUCATION.max_lines);
    }

    #[test]
    fn test_heading_with_stop_word_captures_nothing() {
        // The stop check also runs on the heading line.
        let text = "Education and Skills\nBSc Physics";
        assert_eq!(extract_education(text), NOT_FOUND);
    }
}
