//! Axum route handlers for stateless rendering.

use axum::{extract::Path, response::Response, Json};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::render::{attachment, render_blocking, DocumentFormat};

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub text: String,
    /// Download file name without extension. Defaults to "document".
    #[serde(default)]
    pub file_name: Option<String>,
}

/// POST /api/v1/render/:format
///
/// Renders arbitrary text into a PDF or DOCX download without touching any session.
pub async fn handle_render(
    Path(format): Path<String>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let format: DocumentFormat = format.parse()?;
    let stem = request
        .file_name
        .as_deref()
        .map(sanitize_file_stem)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "document".to_string());

    debug!("Rendering {} chars as {format}", request.text.len());
    let bytes = render_blocking(format, request.text).await?;
    Ok(attachment(format, &stem, bytes))
}

/// Keeps a file name safe for a quoted Content-Disposition value.
fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' '))
        .collect::<String>()
        .trim()
        .to_string()
}
