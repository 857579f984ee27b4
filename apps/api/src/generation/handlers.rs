//! Axum route handlers for the Session / Generation API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::generate_documents;
use crate::models::documents::DocumentPart;
use crate::models::session::Session;
use crate::render::{attachment, render_blocking, DocumentFormat};
use crate::resume::extract_resume_text_blocking;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// Validated multipart input for a generation.
#[derive(Debug)]
struct GenerateForm {
    resume: Bytes,
    job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<Session>) {
    let session = state.sessions.create().await;
    info!("Created session {}", session.id);
    (StatusCode::CREATED, Json(session))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.sessions.get(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/generate
///
/// Multipart form with a `resume` PDF file and a `job_description` text field.
/// New input clears the session's previous output before anything else runs, so
/// a failed generation leaves the session empty rather than stale.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Session>, AppError> {
    let form = read_generate_form(multipart).await?;
    state.sessions.clear(id).await?;

    let resume_text = extract_resume_text_blocking(form.resume).await?;
    let documents =
        generate_documents(state.completion.as_ref(), &resume_text, &form.job_description).await?;

    let session = state.sessions.populate(id, documents).await?;
    info!("Session {id} ready");
    Ok(Json(session))
}

/// GET /api/v1/sessions/:id/documents/:part/:format
pub async fn handle_download(
    State(state): State<AppState>,
    Path((id, part, format)): Path<(Uuid, String, String)>,
) -> Result<Response, AppError> {
    let part: DocumentPart = part.parse()?;
    let format: DocumentFormat = format.parse()?;

    let session = state.sessions.get(id).await?;
    let documents = session.documents.ok_or_else(|| {
        AppError::Conflict(format!("Session {id} has no generated documents yet"))
    })?;

    let bytes = render_blocking(format, documents.part(part).to_string()).await?;
    Ok(attachment(format, part.slug(), bytes))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart parsing
// ────────────────────────────────────────────────────────────────────────────

async fn read_generate_form(mut multipart: Multipart) -> Result<GenerateForm, AppError> {
    let mut resume: Option<Bytes> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("could not read resume upload: {e}"))
                })?;
                resume = Some(data);
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("could not read job description: {e}"))
                })?;
                job_description = Some(text);
            }
            _ => {}
        }
    }

    let resume = resume
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation("a resume PDF is required".to_string()))?;
    let job_description = job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation("job_description cannot be empty".to_string()))?;

    Ok(GenerateForm {
        resume,
        job_description,
    })
}
