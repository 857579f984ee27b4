use std::sync::Arc;

use crate::config::Config;
use crate::generation::session::SessionStore;
use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion backend. Default: `GroqClient` built from `Config`.
    pub completion: Arc<dyn CompletionProvider>,
    /// Per-caller generation results.
    pub sessions: SessionStore,
    pub config: Config,
}
