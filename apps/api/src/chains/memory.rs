//! Conversation memory — an append-only transcript of one chain's calls.

use chrono::{DateTime, Utc};
use serde::Serialize;

const HUMAN_PREFIX: &str = "Human";
const AI_PREFIX: &str = "AI";

/// One (input, output) exchange, recorded in call order.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    pub input: String,
    pub output: String,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only log for a single chain within one session.
///
/// There is no way to edit or drop an entry; the log lives until the process exits.
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    entries: Vec<TranscriptEntry>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, input: impl Into<String>, output: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            input: input.into(),
            output: output.into(),
            recorded_at: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The whole transcript formatted for display, one line per speaker turn.
    pub fn buffer(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{HUMAN_PREFIX}: {}\n{AI_PREFIX}: {}", e.input, e.output))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_memory_is_empty() {
        let memory = ConversationMemory::new();
        assert!(memory.is_empty());
        assert_eq!(memory.buffer(), "");
    }

    #[test]
    fn test_append_keeps_call_order() {
        let mut memory = ConversationMemory::new();
        memory.append("Seattle", "Visit Discovery Park");
        memory.append("Portland", "Hike Forest Park");

        assert_eq!(memory.len(), 2);
        assert_eq!(memory.entries()[0].input, "Seattle");
        assert_eq!(memory.entries()[1].output, "Hike Forest Park");
        assert!(memory.entries()[0].recorded_at <= memory.entries()[1].recorded_at);
    }

    #[test]
    fn test_buffer_formats_turns() {
        let mut memory = ConversationMemory::new();
        memory.append("Seattle", "Visit Discovery Park");
        memory.append("Portland", "Hike Forest Park");

        assert_eq!(
            memory.buffer(),
            "Human: Seattle\nAI: Visit Discovery Park\nHuman: Portland\nAI: Hike Forest Park"
        );
    }
}
