// Outdoor-suggestion chains.
// Implements: suggestion generation, list parsing, script composition, transcripts,
// and the pipeline that strings them together with enrichment lookups.
// All LLM calls go through llm_client::CompletionModel.

pub mod categories;
pub mod handlers;
pub mod memory;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod script;
pub mod suggestions;

#[cfg(test)]
pub mod testing;
