//! Axum route handlers for the Parsing API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::parsing::extract::DocumentFormat;
use crate::parsing::parser::ExtractedFields;
use crate::state::AppState;

/// Multipart field carrying resume files.
const UPLOAD_FIELD: &str = "resumes";

#[derive(Debug, Serialize)]
pub struct ParsedDocument {
    pub document_id: Uuid,
    pub filename: String,
    pub parsed_at: DateTime<Utc>,
    pub fields: ExtractedFields,
}

#[derive(Debug, Serialize)]
pub struct SkippedDocument {
    pub filename: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct ParseUploadResponse {
    pub parsed: Vec<ParsedDocument>,
    pub skipped: Vec<SkippedDocument>,
}

/// POST /api/v1/resumes/parse
///
/// Parses every uploaded resume. Unsupported or empty documents are reported
/// as skipped; the request only fails (422) when nothing at all was parsed.
pub async fn handle_parse_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseUploadResponse>, AppError> {
    let mut uploads: Vec<(String, Vec<u8>)> = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        if filename.is_empty() {
            continue;
        }
        uploads.push((filename, bytes.to_vec()));
    }

    if uploads.is_empty() {
        return Err(AppError::Validation("No files selected".to_string()));
    }

    let parser = state.parser.clone();
    let (parsed, skipped) = tokio::task::spawn_blocking(move || {
        let mut parsed = Vec::new();
        let mut skipped = Vec::new();

        for (filename, bytes) in uploads {
            let format = DocumentFormat::from_path(&filename);
            if !format.is_supported() {
                skipped.push(SkippedDocument {
                    filename,
                    reason: "unsupported file type".to_string(),
                });
                continue;
            }

            match parser.parse_bytes(&bytes, format) {
                Some(fields) => parsed.push(ParsedDocument {
                    document_id: Uuid::new_v4(),
                    filename,
                    parsed_at: Utc::now(),
                    fields,
                }),
                None => skipped.push(SkippedDocument {
                    filename,
                    reason: "no text could be extracted".to_string(),
                }),
            }
        }
        (parsed, skipped)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("parse task failed: {e}")))?;

    info!(
        "Parsed {} resume(s), skipped {}",
        parsed.len(),
        skipped.len()
    );

    if parsed.is_empty() {
        let reasons: Vec<String> = skipped
            .iter()
            .map(|s| format!("{}: {}", s.filename, s.reason))
            .collect();
        return Err(AppError::UnprocessableEntity(format!(
            "No resume could be parsed ({})",
            reasons.join("; ")
        )));
    }

    Ok(Json(ParseUploadResponse { parsed, skipped }))
}
