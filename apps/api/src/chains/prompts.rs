// All LLM prompt templates for the suggestion chains.

use crate::prompt::PromptSpec;

/// Single-suggestion prompt. The model's whole answer is enriched as one unit.
pub const SUGGESTION_PROMPT: PromptSpec = PromptSpec::new(
    &["location", "selected_categories"],
    "Given that I'm interested in {selected_categories}, provide one suggestion on how I can \
     spend time outdoors if I live in {location}",
);

/// Numbered-list prompt. Each line is parsed into its own suggestion and looked up separately.
pub const SUGGESTIONS_LIST_PROMPT: PromptSpec = PromptSpec::new(
    &["location", "selected_categories", "count"],
    "Given that I'm interested in {selected_categories}, provide a numbered list of {count} \
     suggestions on how I can spend time outdoors if I live in {location}. \
     Put each suggestion on its own line in the form \"1. suggestion\" and write nothing else.",
);

/// Script prompt. Composes the generated suggestions with the enrichment research.
pub const SCRIPT_PROMPT: PromptSpec = PromptSpec::new(
    &["suggestions", "research"],
    "Write me a short, friendly plan for a day outdoors based on these suggestions \
     SUGGESTIONS: {suggestions} while leveraging this research: {research}",
);
