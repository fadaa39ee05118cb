//! Suggestion Parser — splits a numbered free-text list into discrete suggestions.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// One suggestion. No identity beyond its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Suggestion(String);

impl Suggestion {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A non-empty line held only its list marker, with no suggestion text after it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_number} has no text after its list marker: {line:?}")]
pub struct ParseDefect {
    /// 1-based, counting every line of the input.
    pub line_number: usize,
    pub line: String,
}

/// Parses a numbered list such as `"1. Visit the park\n2. Walk the trail"`.
///
/// Blank lines are skipped. The first whitespace-delimited token of every other
/// line is treated as the list marker and dropped; the rest is trimmed.
pub fn parse_suggestions(text: &str) -> Result<Vec<Suggestion>, ParseDefect> {
    let mut suggestions = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let remainder = line
            .split_once(char::is_whitespace)
            .map(|(_marker, rest)| rest.trim())
            .filter(|rest| !rest.is_empty())
            .ok_or_else(|| ParseDefect {
                line_number: index + 1,
                line: line.to_string(),
            })?;

        suggestions.push(Suggestion::new(remainder));
    }

    Ok(suggestions)
}
