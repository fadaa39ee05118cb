use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionModel;
use crate::lookup::EnrichmentLookup;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend for both chains. Default: `LlmClient` (OpenAI).
    pub llm: Arc<dyn CompletionModel>,
    /// Top-link lookup. Default: `GoogleSearch`.
    pub search: Arc<dyn EnrichmentLookup>,
    /// Summary lookup. Default: `Wikipedia`.
    pub encyclopedia: Arc<dyn EnrichmentLookup>,
    pub sessions: SessionStore,
    pub config: Config,
}
