//! Enrichment Lookup — augments generated suggestions with an external search or
//! encyclopedia result.
//!
//! Two backends implement `EnrichmentLookup`:
//! - `GoogleSearch` returns the top result's link.
//! - `Wikipedia` returns the top article's intro summary.
//!
//! "No results" is a value (`finding: None`), never an error.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub mod google;
pub mod wikipedia;

pub use google::GoogleSearch;
pub use wikipedia::Wikipedia;

/// Rendered in place of a finding when a lookup has no match.
pub const NOT_FOUND_PLACEHOLDER: &str = "No good lookup result was found";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// What a lookup found for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    Link { title: String, link: String },
    Summary { title: String, summary: String },
}

/// A lookup outcome keyed by the query that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichmentResult {
    pub query: String,
    pub finding: Option<Finding>,
}

impl EnrichmentResult {
    pub fn found(query: impl Into<String>, finding: Finding) -> Self {
        Self {
            query: query.into(),
            finding: Some(finding),
        }
    }

    pub fn not_found(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            finding: None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.finding.is_some()
    }

    /// The link or summary text, or the not-found placeholder.
    pub fn render(&self) -> &str {
        match &self.finding {
            Some(Finding::Link { link, .. }) => link,
            Some(Finding::Summary { summary, .. }) => summary,
            None => NOT_FOUND_PLACEHOLDER,
        }
    }
}

/// An external lookup service. Carried in `AppState` as `Arc<dyn EnrichmentLookup>`.
#[async_trait]
pub trait EnrichmentLookup: Send + Sync {
    fn name(&self) -> &'static str;

    async fn lookup(&self, query: &str) -> Result<EnrichmentResult, LookupError>;
}
