//! Wikipedia lookup via the MediaWiki action API — returns the intro of the best match.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{EnrichmentLookup, EnrichmentResult, Finding, LookupError};

const USER_AGENT: &str = concat!("touchgrass/", env!("CARGO_PKG_VERSION"));
/// Summaries are cut to this many characters before they reach a prompt.
const MAX_SUMMARY_CHARS: usize = 4000;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    /// Omitted entirely when the search has no results.
    query: Option<QueryPages>,
    /// Bad parameters, maxlag and blocked agents arrive as HTTP 200 with this block.
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct QueryPages {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    extract: String,
    /// Search rank; pages are not returned in rank order.
    #[serde(default)]
    index: u32,
}

#[derive(Clone)]
pub struct Wikipedia {
    client: Client,
    endpoint: String,
}

impl Wikipedia {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, LookupError> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(USER_AGENT)
                .build()?,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl EnrichmentLookup for Wikipedia {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    async fn lookup(&self, query: &str) -> Result<EnrichmentResult, LookupError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("generator", "search"),
                ("gsrsearch", query),
                ("gsrlimit", "1"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let parsed: QueryResponse = response.json().await?;
        if let Some(error) = parsed.error {
            return Err(LookupError::Api {
                status: status.as_u16(),
                message: format!("{}: {}", error.code, error.info),
            });
        }

        let best = parsed
            .query
            .map(|q| q.pages)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| !p.extract.trim().is_empty())
            .min_by_key(|p| p.index);

        let Some(page) = best else {
            debug!("Wikipedia has no article for {:?}", query);
            return Ok(EnrichmentResult::not_found(query));
        };

        Ok(EnrichmentResult::found(
            query,
            Finding::Summary {
                title: page.title,
                summary: truncate_chars(page.extract.trim(), MAX_SUMMARY_CHARS),
            },
        ))
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}
