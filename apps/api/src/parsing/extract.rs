#![allow(dead_code)]

//! Text extraction. Turns a PDF / DOCX / plain-text container into a string.
//!
//! Failures never leave this module as errors: `extract_text` logs them and
//! hands back an empty string, which `parse` then treats as "no usable content".

use std::path::Path;

use docx_rs::{
    DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};
use thiserror::Error;
use tracing::{debug, warn};

/// Container formats the parser knows how to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
    Unsupported,
}

impl DocumentFormat {
    /// Resolves the format from a file name or path extension (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => DocumentFormat::Pdf,
            "docx" => DocumentFormat::Docx,
            "txt" => DocumentFormat::PlainText,
            _ => DocumentFormat::Unsupported,
        }
    }

    pub fn is_supported(self) -> bool {
        self != DocumentFormat::Unsupported
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF decode failed: {0}")]
    Pdf(String),

    #[error("DOCX decode failed: {0}")]
    Docx(String),

    #[error("Unsupported file type: {0}")]
    Unsupported(String),
}

/// Reads a document from disk and extracts its text. Never fails: any error is
/// logged and reported as empty text.
pub fn extract_text(path: &Path) -> String {
    match try_extract_path(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Error extracting text from '{}': {e}", path.display());
            String::new()
        }
    }
}

/// Extracts text from an in-memory document whose format is already known.
/// Same fallback contract as [`extract_text`].
pub fn extract_text_from_bytes(bytes: &[u8], format: DocumentFormat) -> String {
    match try_extract_bytes(bytes, format) {
        Ok(text) => text,
        Err(e) => {
            warn!("Error extracting text from {format:?} document: {e}");
            String::new()
        }
    }
}

fn try_extract_path(path: &Path) -> Result<String, ExtractError> {
    let format = DocumentFormat::from_path(path);
    if !format.is_supported() {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        return Err(ExtractError::Unsupported(extension));
    }

    debug!("Reading document {:?}", path);
    let bytes = std::fs::read(path)?;
    try_extract_bytes(&bytes, format)
}

fn try_extract_bytes(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractError> {
    let text = match format {
        DocumentFormat::Pdf => extract_pdf(bytes)?,
        DocumentFormat::Docx => extract_docx(bytes)?,
        DocumentFormat::PlainText => String::from_utf8_lossy(bytes).into_owned(),
        DocumentFormat::Unsupported => {
            return Err(ExtractError::Unsupported("unknown".to_string()))
        }
    };
    Ok(sanitize_control_chars(&text))
}

/// Page-by-page extraction, pages joined with a newline.
fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| ExtractError::Pdf("decoder panicked on malformed input".to_string()))?
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;

    debug!("Extracted {} PDF page(s)", pages.len());
    Ok(pages.join("\n"))
}

/// Whole-document extraction: one output line per paragraph, table cells
/// included, in document order.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => lines.push(paragraph_text(paragraph)),
            DocumentChild::Table(table) => table_lines(table, &mut lines),
            _ => {}
        }
    }

    Ok(lines.join("\n"))
}

/// Hyperlinks and tracked insertions nest runs; both count as visible text.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut line = String::new();
    push_paragraph_children(&paragraph.children, &mut line);
    line
}

fn push_paragraph_children(children: &[ParagraphChild], line: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, line),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, line),
            ParagraphChild::Insert(insert) => {
                for insert_child in &insert.children {
                    if let InsertChild::Run(run) = insert_child {
                        push_run(run, line);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run(run: &Run, line: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => line.push_str(&t.text),
            RunChild::Tab(_) => line.push('\t'),
            RunChild::Break(_) => line.push('\n'),
            _ => {}
        }
    }
}

/// Row by row, cell by cell; nested tables are flattened in place.
fn table_lines(table: &Table, lines: &mut Vec<String>) {
    for TableChild::TableRow(row) in &table.rows {
        for TableRowChild::TableCell(cell) in &row.cells {
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(paragraph) => lines.push(paragraph_text(paragraph)),
                    TableCellContent::Table(nested) => table_lines(nested, lines),
                    _ => {}
                }
            }
        }
    }
}

/// NUL becomes a space; every other non-whitespace control character is dropped.
pub fn sanitize_control_chars(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\0' => Some(' '),
            c if c.is_control() && !c.is_whitespace() => None,
            c => Some(c),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_extension_is_case_insensitive() {
        assert_eq!(DocumentFormat::from_path("cv.PDF"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_path("cv.Docx"), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_path("cv.txt"), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::from_path("cv.odt"), DocumentFormat::Unsupported);
        assert_eq!(DocumentFormat::from_path("README"), DocumentFormat::Unsupported);
    }

    #[test]
    fn test_sanitize_replaces_nul_and_drops_controls() {
        let cleaned = sanitize_control_chars("Jane\0Doe\u{7}\nline\ttwo");
        assert_eq!(cleaned, "Jane Doe\nline\ttwo");
    }

    #[test]
    fn test_plain_text_file_is_read() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "Jane Doe\njane@example.com\0").unwrap();

        let text = extract_text(file.path());
        assert_eq!(text, "Jane Doe\njane@example.com ");
    }

    #[test]
    fn test_unsupported_extension_yields_empty_text() {
        let mut file = tempfile::Builder::new().suffix(".rtf").tempfile().unwrap();
        write!(file, "Jane Doe").unwrap();

        assert!(extract_text(file.path()).is_empty());
    }

    #[test]
    fn test_missing_file_yields_empty_text() {
        assert!(extract_text(Path::new("/definitely/not/here.txt")).is_empty());
    }

    #[test]
    fn test_corrupt_pdf_yields_empty_text() {
        assert!(extract_text_from_bytes(b"not a pdf at all", DocumentFormat::Pdf).is_empty());
    }

    #[test]
    fn test_corrupt_docx_yields_empty_text() {
        assert!(extract_text_from_bytes(b"PK\x03\x04garbage", DocumentFormat::Docx).is_empty());
    }

    fn docx_bytes(docx: docx_rs::Docx) -> Vec<u8> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buffer).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_docx_reads_hyperlinks_and_tables() {
        use docx_rs::{Docx, Hyperlink, HyperlinkType, TableCell, TableRow};

        let docx = Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Jane Doe")))
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Email: "))
                    .add_hyperlink(
                        Hyperlink::new("mailto:jane@example.com", HyperlinkType::External)
                            .add_run(Run::new().add_text("jane@example.com")),
                    ),
            )
            .add_table(Table::new(vec![TableRow::new(vec![
                TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("Skills"))),
                TableCell::new()
                    .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Python SQL Kafka"))),
            ])]));

        let text = extract_text_from_bytes(&docx_bytes(docx), DocumentFormat::Docx);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Jane Doe");
        assert!(lines[1].ends_with("jane@example.com"));
        assert!(lines.contains(&"Python SQL Kafka"));
        assert!(text.find("jane@example.com") < text.find("Python SQL Kafka"));
    }

    #[test]
    fn test_docx_reads_tracked_insertions() {
        use docx_rs::{Docx, Insert};

        let docx = Docx::new().add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Rust "))
                .add_insert(Insert::new(Run::new().add_text("and Go"))),
        );

        let text = extract_text_from_bytes(&docx_bytes(docx), DocumentFormat::Docx);
        assert!(text.starts_with("Rust"));
        assert!(text.ends_with("and Go"));
    }

    #[test]
    fn test_pdf_pages_joined_in_order() {
        let bytes = include_bytes!("../../tests/fixtures/two_page_resume.pdf");

        let text = extract_text_from_bytes(bytes, DocumentFormat::Pdf);
        let first = text.find("Jane Doe").expect("page one text");
        let second = text.find("Python").expect("page two text");
        assert!(first < second);
        assert!(text.contains("jane@example.com"));
        assert!(text[first..second].contains('\n'));
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let text = extract_text_from_bytes(b"Jane \xff Doe", DocumentFormat::PlainText);
        assert!(text.starts_with("Jane "));
        assert!(text.ends_with(" Doe"));
    }
}
