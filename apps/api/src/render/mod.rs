// Document rendering: the line-oriented PDF layout and the DOCX paragraph sink.
// Both are CPU-bound and synchronous; async callers go through `render_blocking`.

pub mod classify;
pub mod docx;
pub mod font_metrics;
pub mod handlers;
pub mod normalize;
pub mod pdf;

use std::fmt;
use std::str::FromStr;

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::errors::AppError;

pub use docx::render_docx;
pub use pdf::render_pdf;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("DOCX packaging failed: {0}")]
    Docx(String),
}

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => PDF_CONTENT_TYPE,
            DocumentFormat::Docx => DOCX_CONTENT_TYPE,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }

    pub fn render(self, text: &str) -> Result<Vec<u8>, RenderError> {
        match self {
            DocumentFormat::Pdf => Ok(render_pdf(text)),
            DocumentFormat::Docx => render_docx(text),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            other => Err(AppError::Validation(format!(
                "unsupported document format '{other}' (expected 'pdf' or 'docx')"
            ))),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Splits text into lines on `\n`, dropping a trailing `\r` from each.
///
/// Unlike `str::lines`, a trailing newline yields a final empty line, so
/// rejoining with `\n` reproduces `\n`-delimited input exactly.
pub fn split_lines(text: &str) -> impl DoubleEndedIterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Renders on the blocking pool so layout never stalls the async executor.
pub async fn render_blocking(format: DocumentFormat, text: String) -> Result<Vec<u8>, AppError> {
    tokio::task::spawn_blocking(move || format.render(&text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))?
        .map_err(AppError::from)
}

/// Wraps rendered bytes as a file download.
pub fn attachment(format: DocumentFormat, file_stem: &str, bytes: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{file_stem}.{}\"", format.extension());
    (
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}
