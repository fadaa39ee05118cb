//! Axum route handlers for the Suggestions API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::chains::categories::{normalize_categories, DEFAULT_CATEGORIES};
use crate::chains::memory::TranscriptEntry;
use crate::chains::parser::Suggestion;
use crate::chains::pipeline::{
    run_pipeline, EnrichmentMode, Enrichers, PipelineInput, PipelineOutput,
    DEFAULT_SUGGESTION_COUNT, MAX_SUGGESTION_COUNT,
};
use crate::errors::AppError;
use crate::lookup::EnrichmentResult;
use crate::session::Session;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Free-text category added on top of the selected ones.
    pub extra_category: Option<String>,
    #[serde(default)]
    pub mode: EnrichmentMode,
    /// Wider than the accepted range so out-of-range values reach validation.
    pub suggestion_count: Option<i64>,
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub session_id: Uuid,
    pub mode: EnrichmentMode,
    pub suggestions_text: String,
    pub suggestions: Vec<Suggestion>,
    pub enrichments: Vec<EnrichmentResult>,
    pub research: String,
    pub script: String,
    pub suggestions_history: String,
    pub script_history: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: Uuid,
    pub suggestions_history: String,
    pub script_history: String,
    pub suggestions_entries: Vec<TranscriptEntry>,
    pub script_entries: Vec<TranscriptEntry>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<&'static str>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/categories
pub async fn handle_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: DEFAULT_CATEGORIES.to_vec(),
    })
}

/// POST /api/v1/suggestions
///
/// Full pipeline: suggestions → enrichment → script.
/// A blank location or an empty category set is a silent no-op (204).
pub async fn handle_suggest(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    let location = request.location.trim().to_string();
    if location.is_empty() {
        return Err(AppError::MissingInput("location".to_string()));
    }

    let categories = normalize_categories(&request.categories, request.extra_category.as_deref());
    if categories.is_empty() {
        return Err(AppError::MissingInput("categories".to_string()));
    }

    let suggestion_count = request
        .suggestion_count
        .map_or(Ok(DEFAULT_SUGGESTION_COUNT), u8::try_from)
        .ok()
        .filter(|count| (1..=MAX_SUGGESTION_COUNT).contains(count))
        .ok_or_else(|| {
            AppError::Validation(format!(
                "suggestion_count must be between 1 and {MAX_SUGGESTION_COUNT}"
            ))
        })?;

    let input = PipelineInput {
        location,
        categories,
        mode: request.mode,
        suggestion_count,
    };

    // A new session is only registered once its first run succeeds.
    let response = match request.session_id {
        Some(session_id) => {
            let session = state.sessions.require(session_id).await?;
            let mut session = session.lock().await;
            let output = run_with_deadline(&state, &mut session, &input, session_id).await?;
            suggest_response(session_id, output, &session)
        }
        None => {
            let session_id = Uuid::new_v4();
            let mut session = Session::default();
            let output = run_with_deadline(&state, &mut session, &input, session_id).await?;
            let response = suggest_response(session_id, output, &session);
            state.sessions.insert(session_id, session).await;
            response
        }
    };

    Ok(Json(response))
}

async fn run_with_deadline(
    state: &AppState,
    session: &mut Session,
    input: &PipelineInput,
    session_id: Uuid,
) -> Result<PipelineOutput, AppError> {
    let enrichers = Enrichers {
        search: state.search.as_ref(),
        encyclopedia: state.encyclopedia.as_ref(),
    };

    info!("Running {:?} pipeline for session {session_id}", input.mode);
    let deadline = state.config.pipeline_timeout;
    tokio::time::timeout(
        deadline,
        run_pipeline(state.llm.as_ref(), enrichers, session, input),
    )
    .await
    .map_err(|_| AppError::Timeout(deadline.as_secs()))?
}

fn suggest_response(session_id: Uuid, output: PipelineOutput, session: &Session) -> SuggestResponse {
    SuggestResponse {
        session_id,
        mode: output.mode,
        suggestions_text: output.suggestions_text,
        suggestions: output.suggestions,
        enrichments: output.enrichments,
        research: output.research,
        script: output.script,
        suggestions_history: session.suggestions_memory.buffer(),
        script_history: session.script_memory.buffer(),
    }
}

/// GET /api/v1/sessions/:id/history
pub async fn handle_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, AppError> {
    let session = state.sessions.require(session_id).await?;
    let session = session.lock().await;

    Ok(Json(HistoryResponse {
        session_id,
        suggestions_history: session.suggestions_memory.buffer(),
        script_history: session.script_memory.buffer(),
        suggestions_entries: session.suggestions_memory.entries().to_vec(),
        script_entries: session.script_memory.entries().to_vec(),
    }))
}
