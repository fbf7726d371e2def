#![allow(dead_code)]

//! Resume parser. Orchestrates text extraction and the heuristic field extractors.
//!
//! The parser owns no mutable state: the skill catalog is shared read-only and
//! the recognizer is `Send + Sync`, so one `ResumeParser` can serve concurrent
//! parses of distinct documents.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::parsing::extract::{extract_text, extract_text_from_bytes, DocumentFormat};
use crate::parsing::fields::{
    extract_email, extract_name, extract_phone, CapitalizedNameRecognizer, PersonRecognizer,
};
use crate::parsing::sections::{extract_education, extract_experience};
use crate::parsing::skills::{DetectedSkills, SkillCatalog};

/// Structured record produced once per document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: DetectedSkills,
    pub education: String,
    pub experience: String,
    pub raw_text: String,
}

pub struct ResumeParser {
    catalog: Arc<SkillCatalog>,
    recognizer: Box<dyn PersonRecognizer>,
}

impl ResumeParser {
    /// Parser with the default rule-based person recognizer.
    pub fn new(catalog: Arc<SkillCatalog>) -> Self {
        Self::with_recognizer(catalog, Box::new(CapitalizedNameRecognizer))
    }

    pub fn with_recognizer(catalog: Arc<SkillCatalog>, recognizer: Box<dyn PersonRecognizer>) -> Self {
        Self {
            catalog,
            recognizer,
        }
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    /// Parses a document on disk. `None` means the document had no usable text.
    pub fn parse_path(&self, path: &Path) -> Option<ExtractedFields> {
        info!("Parsing file: {}", path.display());
        self.parse_text(extract_text(path))
    }

    /// Parses an in-memory document, e.g. an uploaded file.
    pub fn parse_bytes(&self, bytes: &[u8], format: DocumentFormat) -> Option<ExtractedFields> {
        self.parse_text(extract_text_from_bytes(bytes, format))
    }

    /// Runs the field extractors over already-extracted text.
    pub fn parse_text(&self, raw_text: String) -> Option<ExtractedFields> {
        if raw_text.trim().is_empty() {
            warn!("No text extracted from document");
            return None;
        }

        let fields = ExtractedFields {
            name: extract_name(&raw_text, self.recognizer.as_ref()),
            email: extract_email(&raw_text),
            phone: extract_phone(&raw_text),
            skills: self.catalog.extract_skills(&raw_text),
            education: extract_education(&raw_text),
            experience: extract_experience(&raw_text),
            raw_text,
        };

        info!("Successfully parsed: {}", fields.name);
        Some(fields)
    }
}
