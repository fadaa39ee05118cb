//! Prompt templates with named `{placeholder}` variables.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("prompt variable '{0}' was not supplied")]
    MissingVariable(String),
}

/// A parameterized prompt: the variables it declares plus the template text.
///
/// Every variable that is declared, or referenced as `{name}` in the template,
/// must be supplied to [`PromptSpec::render`].
#[derive(Debug, Clone, Copy)]
pub struct PromptSpec {
    input_variables: &'static [&'static str],
    template: &'static str,
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

impl PromptSpec {
    pub const fn new(input_variables: &'static [&'static str], template: &'static str) -> Self {
        Self {
            input_variables,
            template,
        }
    }

    pub fn input_variables(&self) -> &'static [&'static str] {
        self.input_variables
    }

    /// Placeholder names referenced by the template, in first-seen order.
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for caps in placeholder_pattern().captures_iter(self.template) {
            if let Some(name) = caps.get(1).map(|m| m.as_str()) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Substitutes every placeholder in one pass. Values are inserted verbatim,
    /// so braces inside a value are never expanded again.
    pub fn render(&self, vars: &[(&str, &str)]) -> Result<String, PromptError> {
        let lookup = |name: &str| vars.iter().find(|(k, _)| *k == name).map(|(_, v)| *v);

        for name in self.input_variables.iter().copied().chain(self.placeholders()) {
            if lookup(name).is_none() {
                return Err(PromptError::MissingVariable(name.to_string()));
            }
        }

        let rendered = placeholder_pattern().replace_all(self.template, |caps: &Captures| {
            lookup(&caps[1]).unwrap_or_default().to_string()
        });

        Ok(rendered.into_owned())
    }
}
