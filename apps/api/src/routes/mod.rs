pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::render::handlers::handle_render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Session API
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/generate",
            post(handlers::handle_generate),
        )
        .route(
            "/api/v1/sessions/:id/documents/:part/:format",
            get(handlers::handle_download),
        )
        // Stateless render API
        .route("/api/v1/render/:format", post(handle_render))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::generation::session::SessionStore;
    use crate::llm_client::{CompletionProvider, LlmError};
    use crate::render::{render_pdf, DOCX_CONTENT_TYPE, PDF_CONTENT_TYPE};

    const BOUNDARY: &str = "tailor-test-boundary";

    /// Replies with queued completions in order, then with empty content.
    struct CannedProvider {
        replies: Mutex<VecDeque<String>>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(LlmError::EmptyContent)
        }
    }

    fn test_config() -> Config {
        Config {
            groq_api_key: "test-key".into(),
            groq_api_url: "http://127.0.0.1:9/unused".into(),
            groq_model: "test-model".into(),
            temperature: 0.7,
            max_tokens: 1500,
            port: 0,
            rust_log: "debug".into(),
            max_upload_bytes: 1024 * 1024,
        }
    }

    fn app_with_replies(replies: &[&str]) -> (Router, Arc<CannedProvider>) {
        let provider = Arc::new(CannedProvider {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        });
        let state = AppState {
            completion: provider.clone(),
            sessions: SessionStore::new(),
            config: test_config(),
        };
        (build_router(state), provider)
    }

    fn multipart_body(resume: Option<&[u8]>, jd: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(pdf) = resume {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; \
                     filename=\"resume.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(pdf);
            body.extend_from_slice(b"\r\n");
        }
        if let Some(jd) = jd {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                     name=\"job_description\"\r\n\r\n{jd}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn generate_request(id: &str, body: Vec<u8>) -> Request<Body> {
        Request::post(format!("/api/v1/sessions/{id}/generate"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_session(app: &Router) -> String {
        let request = Request::post("/api/v1/sessions").body(Body::empty()).unwrap();
        let response = send(app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app_with_replies(&[]);
        let response = send(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_new_session_is_empty() {
        let (app, _) = app_with_replies(&[]);
        let id = create_session(&app).await;
        let response = send(
            &app,
            Request::get(format!("/api/v1/sessions/{id}")).body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "empty");
        assert!(json["documents"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let (app, _) = app_with_replies(&[]);
        let id = uuid::Uuid::new_v4();
        let response = send(
            &app,
            Request::get(format!("/api/v1/sessions/{id}")).body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_generate_then_download() {
        let (app, provider) = app_with_replies(&[
            "## Skills\n- Rust\n- Tokio\n---\nDear Hiring Manager,\n\nRegards, Zoë",
        ]);
        let id = create_session(&app).await;

        let resume = render_pdf("Jane Doe\nSenior Rust Engineer");
        let body = multipart_body(Some(&resume), Some("Backend engineer, Rust and AWS"));
        let response = send(&app, generate_request(&id, body)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["status"], "ready");
        assert_eq!(json["documents"]["cv"], "## Skills\n- Rust\n- Tokio");
        assert_eq!(
            json["documents"]["cover_letter"],
            "Dear Hiring Manager,\n\nRegards, Zoë"
        );

        let prompts = provider.prompts.lock().unwrap().clone();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("=== Job Description ===\nBackend engineer, Rust and AWS"));
        assert!(prompts[0].contains("Jane"));

        let pdf = send(
            &app,
            Request::get(format!("/api/v1/sessions/{id}/documents/cv/pdf"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(pdf.status(), StatusCode::OK);
        assert_eq!(pdf.headers()[header::CONTENT_TYPE], PDF_CONTENT_TYPE);
        assert_eq!(
            pdf.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"cv.pdf\""
        );
        let bytes = to_bytes(pdf.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        let docx = send(
            &app,
            Request::get(format!("/api/v1/sessions/{id}/documents/cover-letter/docx"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(docx.status(), StatusCode::OK);
        assert_eq!(docx.headers()[header::CONTENT_TYPE], DOCX_CONTENT_TYPE);
        let bytes = to_bytes(docx.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_download_before_generate_is_conflict() {
        let (app, _) = app_with_replies(&[]);
        let id = create_session(&app).await;
        let response = send(
            &app,
            Request::get(format!("/api/v1/sessions/{id}/documents/cv/pdf"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_download_rejects_unknown_part_and_format() {
        let (app, _) = app_with_replies(&[]);
        let id = create_session(&app).await;
        for path in ["documents/resume/pdf", "documents/cv/odt"] {
            let response = send(
                &app,
                Request::get(format!("/api/v1/sessions/{id}/{path}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        }
    }

    #[tokio::test]
    async fn test_generate_requires_resume_and_job_description() {
        let (app, provider) = app_with_replies(&["CV\n---\nLetter"]);
        let id = create_session(&app).await;
        let resume = render_pdf("Jane Doe");

        let missing_resume = multipart_body(None, Some("Rust role"));
        let response = send(&app, generate_request(&id, missing_resume)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let blank_jd = multipart_body(Some(&resume), Some("   "));
        let response = send(&app, generate_request(&id, blank_jd)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");

        assert!(provider.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_rejects_non_pdf_upload() {
        let (app, _) = app_with_replies(&["CV\n---\nLetter"]);
        let id = create_session(&app).await;
        let body = multipart_body(Some(b"just some text"), Some("Rust role"));
        let response = send(&app, generate_request(&id, body)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "UNREADABLE_RESUME");
    }

    #[tokio::test]
    async fn test_malformed_completion_clears_previous_output() {
        let (app, _) = app_with_replies(&["CV\n---\nLetter", "CV text\nCover text"]);
        let id = create_session(&app).await;
        let resume = render_pdf("Jane Doe");

        let first = send(
            &app,
            generate_request(&id, multipart_body(Some(&resume), Some("Rust role"))),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = send(
            &app,
            generate_request(&id, multipart_body(Some(&resume), Some("Go role"))),
        )
        .await;
        assert_eq!(second.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(second).await["error"]["code"], "MALFORMED_COMPLETION");

        let session = send(
            &app,
            Request::get(format!("/api/v1/sessions/{id}")).body(Body::empty()).unwrap(),
        )
        .await;
        let json = json_body(session).await;
        assert_eq!(json["status"], "empty");
        assert!(json["documents"].is_null());
    }

    #[tokio::test]
    async fn test_empty_completion_is_bad_gateway() {
        let (app, _) = app_with_replies(&[]);
        let id = create_session(&app).await;
        let resume = render_pdf("Jane Doe");
        let response = send(
            &app,
            generate_request(&id, multipart_body(Some(&resume), Some("Rust role"))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_stateless_render_endpoints() {
        let (app, _) = app_with_replies(&[]);
        for (format, content_type) in [("pdf", PDF_CONTENT_TYPE), ("docx", DOCX_CONTENT_TYPE)] {
            let response = send(
                &app,
                Request::post(format!("/api/v1/render/{format}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({"text": "## Summary\nHello", "file_name": "jane cv"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK, "{format}");
            assert_eq!(response.headers()[header::CONTENT_TYPE], content_type);
            assert_eq!(
                response.headers()[header::CONTENT_DISPOSITION],
                format!("attachment; filename=\"jane cv.{format}\"").as_str()
            );
        }

        let response = send(
            &app,
            Request::post("/api/v1/render/odt")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"text": "x"}).to_string()))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let (app, _) = app_with_replies(&[]);
        let id = create_session(&app).await;
        let delete = || {
            Request::delete(format!("/api/v1/sessions/{id}"))
                .body(Body::empty())
                .unwrap()
        };
        assert_eq!(send(&app, delete()).await.status(), StatusCode::NO_CONTENT);
        assert_eq!(send(&app, delete()).await.status(), StatusCode::NOT_FOUND);
    }
}
