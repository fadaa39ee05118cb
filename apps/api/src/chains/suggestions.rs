//! Suggestion Generator — first chain: location + categories → free-text suggestions.

use tracing::info;

use crate::chains::categories::join_categories;
use crate::chains::memory::ConversationMemory;
use crate::chains::prompts::{SUGGESTIONS_LIST_PROMPT, SUGGESTION_PROMPT};
use crate::errors::AppError;
use crate::llm_client::{CompletionModel, TEMPERATURE};

/// Shape of the answer requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionStyle {
    /// One suggestion, enriched as a whole.
    Single,
    /// A numbered list of `count` suggestions, one per line.
    List { count: u8 },
}

/// Renders the suggestions prompt, calls the model and records
/// `(location, output)` in `memory`. Returns the raw model text.
pub async fn generate_suggestions(
    llm: &dyn CompletionModel,
    memory: &mut ConversationMemory,
    location: &str,
    categories: &[String],
    style: SuggestionStyle,
) -> Result<String, AppError> {
    let location = location.trim();
    if location.is_empty() {
        return Err(AppError::MissingInput("location".to_string()));
    }
    if categories.is_empty() {
        return Err(AppError::MissingInput("categories".to_string()));
    }

    let selected_categories = join_categories(categories);
    let prompt = match style {
        SuggestionStyle::Single => SUGGESTION_PROMPT.render(&[
            ("location", location),
            ("selected_categories", selected_categories.as_str()),
        ])?,
        SuggestionStyle::List { count } => {
            let count = count.to_string();
            SUGGESTIONS_LIST_PROMPT.render(&[
                ("location", location),
                ("selected_categories", selected_categories.as_str()),
                ("count", count.as_str()),
            ])?
        }
    };

    info!("Generating {:?} suggestions for {:?} ({})", style, location, selected_categories);
    let output = llm
        .complete(&prompt, TEMPERATURE)
        .await
        .map_err(|e| AppError::RemoteCall(format!("Suggestion generation failed: {e}")))?;

    memory.append(location, output.as_str());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::testing::ScriptedModel;

    fn nature() -> Vec<String> {
        vec!["Nature".to_string()]
    }

    #[tokio::test]
    async fn test_single_suggestion_renders_prompt_and_records_memory() {
        let llm = ScriptedModel::new(["Take a walk through Discovery Park."]);
        let mut memory = ConversationMemory::new();

        let output = generate_suggestions(&llm, &mut memory, "Seattle", &nature(), SuggestionStyle::Single)
            .await
            .unwrap();

        assert_eq!(output, "Take a walk through Discovery Park.");
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.entries()[0].input, "Seattle");

        let prompts = llm.prompts();
        assert_eq!(
            prompts[0],
            "Given that I'm interested in Nature, provide one suggestion on how I can spend time \
             outdoors if I live in Seattle"
        );
        assert_eq!(llm.temperatures(), vec![TEMPERATURE]);
    }

    #[tokio::test]
    async fn test_list_style_asks_for_count() {
        let llm = ScriptedModel::new(["1. a\n2. b\n3. c"]);
        let mut memory = ConversationMemory::new();
        let categories = vec!["Sports".to_string(), "Family".to_string()];

        generate_suggestions(&llm, &mut memory, "Boise", &categories, SuggestionStyle::List { count: 3 })
            .await
            .unwrap();

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("numbered list of 3 suggestions"));
        assert!(prompt.contains("Sports, Family"));
        assert!(prompt.contains("Boise"));
    }

    #[tokio::test]
    async fn test_blank_location_is_missing_input_and_skips_call() {
        let llm = ScriptedModel::new(["unused"]);
        let mut memory = ConversationMemory::new();

        let err = generate_suggestions(&llm, &mut memory, "   ", &nature(), SuggestionStyle::Single)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MissingInput(ref f) if f == "location"));
        assert!(llm.prompts().is_empty());
        assert!(memory.is_empty());
    }

    #[tokio::test]
    async fn test_no_categories_is_missing_input() {
        let llm = ScriptedModel::new(["unused"]);
        let mut memory = ConversationMemory::new();

        let err = generate_suggestions(&llm, &mut memory, "Seattle", &[], SuggestionStyle::Single)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingInput(ref f) if f == "categories"));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_remote_call_and_not_recorded() {
        let llm = ScriptedModel::failing();
        let mut memory = ConversationMemory::new();

        let err = generate_suggestions(&llm, &mut memory, "Seattle", &nature(), SuggestionStyle::Single)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RemoteCall(_)));
        assert!(memory.is_empty());
    }
}
