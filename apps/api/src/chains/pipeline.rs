//! Suggestion pipeline — orchestrates one user action end to end.
//!
//! Flow: generate_suggestions → (parse_suggestions →) enrichment lookups →
//!       generate_script → return output.
//!
//! Every step runs strictly in sequence; each depends on the previous output.
//! Both session memories record their chain's step.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::chains::parser::{parse_suggestions, Suggestion};
use crate::chains::script::generate_script;
use crate::chains::suggestions::{generate_suggestions, SuggestionStyle};
use crate::errors::AppError;
use crate::llm_client::CompletionModel;
use crate::lookup::{EnrichmentLookup, EnrichmentResult};
use crate::session::Session;

pub const DEFAULT_SUGGESTION_COUNT: u8 = 3;
pub const MAX_SUGGESTION_COUNT: u8 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Which lookup enriches the suggestions, and with what query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentMode {
    /// One suggestion; the whole answer is web-searched as a single query.
    #[default]
    WholeBlock,
    /// A numbered list; every parsed suggestion gets its own web search.
    PerSuggestion,
    /// The location itself is looked up in the encyclopedia.
    LocationSummary,
}

#[derive(Debug, Clone)]
pub struct PipelineInput {
    pub location: String,
    pub categories: Vec<String>,
    pub mode: EnrichmentMode,
    /// Only used by `PerSuggestion`.
    pub suggestion_count: u8,
}

/// The two lookup backends the pipeline can draw on.
#[derive(Clone, Copy)]
pub struct Enrichers<'a> {
    pub search: &'a dyn EnrichmentLookup,
    pub encyclopedia: &'a dyn EnrichmentLookup,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub mode: EnrichmentMode,
    /// Raw text of the first chain.
    pub suggestions_text: String,
    pub suggestions: Vec<Suggestion>,
    /// One per lookup, each keyed by its query (a suggestion or the location).
    pub enrichments: Vec<EnrichmentResult>,
    /// Text handed to the script chain.
    pub research: String,
    pub script: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full pipeline for one user action against `session`'s memories.
///
/// LLM failures end the run with `RemoteCall`. Lookup failures do not: the
/// affected query is logged and rendered with the not-found placeholder.
pub async fn run_pipeline(
    llm: &dyn CompletionModel,
    enrichers: Enrichers<'_>,
    session: &mut Session,
    input: &PipelineInput,
) -> Result<PipelineOutput, AppError> {
    let location = input.location.trim();

    // Step 1: Suggestions
    let style = match input.mode {
        EnrichmentMode::PerSuggestion => SuggestionStyle::List {
            count: input.suggestion_count,
        },
        EnrichmentMode::WholeBlock | EnrichmentMode::LocationSummary => SuggestionStyle::Single,
    };
    let suggestions_text = generate_suggestions(
        llm,
        &mut session.suggestions_memory,
        location,
        &input.categories,
        style,
    )
    .await?;

    // Step 2: Split into suggestions
    let whole_block = || vec![Suggestion::new(suggestions_text.trim())];
    let suggestions = match input.mode {
        EnrichmentMode::PerSuggestion => match parse_suggestions(&suggestions_text) {
            Ok(parsed) if !parsed.is_empty() => parsed,
            Ok(_) => whole_block(),
            Err(defect) => {
                error!("Implementation error: {defect}; enriching the whole answer instead");
                whole_block()
            }
        },
        EnrichmentMode::WholeBlock | EnrichmentMode::LocationSummary => whole_block(),
    };
    info!("Pipeline produced {} suggestion(s)", suggestions.len());

    // Step 3: Enrichment, one lookup at a time
    let enrichments = match input.mode {
        EnrichmentMode::LocationSummary => vec![enrich(enrichers.encyclopedia, location).await],
        EnrichmentMode::WholeBlock | EnrichmentMode::PerSuggestion => {
            let mut results = Vec::with_capacity(suggestions.len());
            for suggestion in &suggestions {
                results.push(enrich(enrichers.search, suggestion.as_str()).await);
            }
            results
        }
    };

    // Step 4: Script
    let research = build_research(input.mode, &enrichments);
    let script = generate_script(
        llm,
        &mut session.script_memory,
        &suggestions_text,
        &research,
    )
    .await?;

    Ok(PipelineOutput {
        mode: input.mode,
        suggestions_text,
        suggestions,
        enrichments,
        research,
        script,
    })
}

async fn enrich(lookup: &dyn EnrichmentLookup, query: &str) -> EnrichmentResult {
    match lookup.lookup(query).await {
        Ok(result) => {
            if !result.is_found() {
                info!("{} lookup found nothing for {:?}", lookup.name(), query);
            }
            result
        }
        Err(e) => {
            warn!("{} lookup failed for {:?}: {e}", lookup.name(), query);
            EnrichmentResult::not_found(query)
        }
    }
}

/// Per-suggestion research lists every query with its own result; the other
/// modes hand over the single result as-is.
fn build_research(mode: EnrichmentMode, enrichments: &[EnrichmentResult]) -> String {
    match mode {
        EnrichmentMode::PerSuggestion => enrichments
            .iter()
            .map(|e| format!("{}: {}", e.query, e.render()))
            .collect::<Vec<_>>()
            .join("\n"),
        EnrichmentMode::WholeBlock | EnrichmentMode::LocationSummary => enrichments
            .iter()
            .map(EnrichmentResult::render)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
