//! Raw text extraction from uploaded CV files (PDF and DOCX).

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use thiserror::Error;
use tracing::warn;

pub mod semantic;

use crate::llm::LlmError;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: .{0} (expected .pdf or .docx)")]
    UnsupportedFormat(String),

    #[error("No text could be extracted from this CV (scanned or image-only document?)")]
    NoText,

    #[error("Failed to parse document: {0}")]
    Parse(String),

    #[error("Structured extraction failed: {0}")]
    Llm(#[from] LlmError),
}

/// Extracts the raw text from an uploaded CV, dispatching on the file extension.
pub fn extract_raw_text(file_name: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let raw_text = match extension.as_str() {
        "pdf" => extract_raw_pdf(bytes)?,
        "docx" => extract_raw_docx(bytes)?,
        other => {
            warn!("Unsupported file type: .{other}");
            return Err(ExtractionError::UnsupportedFormat(other.to_string()));
        }
    };

    if raw_text.is_empty() {
        return Err(ExtractionError::NoText);
    }
    Ok(raw_text)
}

fn extract_raw_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Parse(e.to_string()))?;
    Ok(text.trim().to_string())
}

/// Walks paragraph runs of the main document body. Tables and headers are
/// not traversed; CV content in tables is a known blind spot.
fn extract_raw_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::Parse(e.to_string()))?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for para_child in &paragraph.children {
                if let ParagraphChild::Run(run) = para_child {
                    for run_child in &run.children {
                        if let RunChild::Text(text) = run_child {
                            line.push_str(&text.text);
                        }
                    }
                }
            }
            if !line.trim().is_empty() {
                lines.push(line.trim().to_string());
            }
        }
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension_is_an_error() {
        let err = extract_raw_text("cv.txt", b"plain text").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[test]
    fn test_missing_extension_is_an_error() {
        let err = extract_raw_text("cv", b"bytes").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        // Garbage bytes: must get past the extension check and fail in the parser.
        let err = extract_raw_text("cv.PDF", b"not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Parse(_)));
    }

    #[test]
    fn test_garbage_docx_is_a_parse_error() {
        let err = extract_raw_text("cv.docx", b"not a zip archive").unwrap_err();
        assert!(matches!(err, ExtractionError::Parse(_)));
    }
}
