//! Script Generator — second chain: suggestions + research → final narrative.

use tracing::info;

use crate::chains::memory::ConversationMemory;
use crate::chains::prompts::SCRIPT_PROMPT;
use crate::errors::AppError;
use crate::llm_client::{CompletionModel, TEMPERATURE};

/// Composes the suggestions and the research into a narrative and records
/// `(suggestions, output)` in `memory`.
pub async fn generate_script(
    llm: &dyn CompletionModel,
    memory: &mut ConversationMemory,
    suggestions: &str,
    research: &str,
) -> Result<String, AppError> {
    if suggestions.trim().is_empty() {
        return Err(AppError::MissingInput("suggestions".to_string()));
    }
    if research.trim().is_empty() {
        return Err(AppError::MissingInput("research".to_string()));
    }

    let prompt = SCRIPT_PROMPT.render(&[("suggestions", suggestions), ("research", research)])?;

    info!("Generating script from {} chars of research", research.len());
    let output = llm
        .complete(&prompt, TEMPERATURE)
        .await
        .map_err(|e| AppError::RemoteCall(format!("Script generation failed: {e}")))?;

    memory.append(suggestions, output.as_str());
    Ok(output)
}
