//! Resume text extraction from uploaded PDF bytes.
//!
//! `pdf-extract` is CPU-bound and can panic on malformed files, so async callers
//! go through `extract_resume_text_blocking`, which runs it on the blocking pool
//! and treats a panicked task as an unreadable upload.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("uploaded resume is not a PDF (first bytes: {magic:?})")]
    NotAPdf { magic: Vec<u8> },

    #[error("could not read text from the resume PDF: {0}")]
    Unreadable(String),
}

/// Extracts the plain text of a PDF held in memory.
pub fn extract_resume_text(bytes: &[u8]) -> Result<String, ExtractError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ExtractError::NotAPdf {
            magic: bytes.iter().take(4).copied().collect(),
        });
    }
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractError::Unreadable(e.to_string()))?;
    debug!("Extracted {} chars of resume text", text.len());
    Ok(text)
}

pub async fn extract_resume_text_blocking(bytes: Bytes) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || extract_resume_text(&bytes))
        .await
        .map_err(|e| {
            warn!("Resume extraction task failed: {e}");
            AppError::from(ExtractError::Unreadable(
                "the PDF parser aborted on this file".to_string(),
            ))
        })?
        .map_err(AppError::from)
}
