//! Google Custom Search JSON API — top-link lookup.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{EnrichmentLookup, EnrichmentResult, Finding, LookupError};

/// The API accepts between 1 and 10 results per request.
const MAX_RESULT_COUNT: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Omitted entirely when the search has no results.
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct GoogleSearch {
    client: Client,
    api_key: String,
    cse_id: String,
    endpoint: String,
}

impl GoogleSearch {
    pub fn new(
        api_key: String,
        cse_id: String,
        endpoint: &str,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            cse_id,
            endpoint: endpoint.to_string(),
        })
    }

    /// Ordered search hits for `query`. Items without a link are skipped.
    pub async fn results(&self, query: &str, result_count: u8) -> Result<Vec<SearchHit>, LookupError> {
        let num = result_count.clamp(1, MAX_RESULT_COUNT).to_string();

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cse_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GoogleError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LookupError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SearchResponse = response.json().await?;
        let hits: Vec<SearchHit> = parsed
            .items
            .into_iter()
            .filter_map(|item| {
                item.link.map(|link| SearchHit {
                    title: item.title,
                    link,
                })
            })
            .collect();

        debug!("Google search for {:?} returned {} hits", query, hits.len());
        Ok(hits)
    }
}

#[async_trait]
impl EnrichmentLookup for GoogleSearch {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn lookup(&self, query: &str) -> Result<EnrichmentResult, LookupError> {
        let top = self.results(query, 1).await?.into_iter().next();
        Ok(match top {
            Some(hit) => EnrichmentResult::found(
                query,
                Finding::Link {
                    title: hit.title,
                    link: hit.link,
                },
            ),
            None => EnrichmentResult::not_found(query),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn search_for(server: &MockServer) -> GoogleSearch {
        GoogleSearch::new(
            "g-key".to_string(),
            "cse-1".to_string(),
            &format!("{}/customsearch/v1", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_lookup_returns_top_link() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("key", "g-key"))
            .and(query_param("cx", "cse-1"))
            .and(query_param("q", "Discovery Park"))
            .and(query_param("num", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"title": "Discovery Park - Seattle", "link": "https://www.seattle.gov/parks/discovery"}
                ]
            })))
            .mount(&server)
            .await;

        let result = search_for(&server).lookup("Discovery Park").await.unwrap();
        assert_eq!(result.query, "Discovery Park");
        assert_eq!(
            result.finding,
            Some(Finding::Link {
                title: "Discovery Park - Seattle".to_string(),
                link: "https://www.seattle.gov/parks/discovery".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_lookup_without_items_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "searchInformation": {"totalResults": "0"}
            })))
            .mount(&server)
            .await;

        let result = search_for(&server).lookup("zzzz no such place").await.unwrap();
        assert_eq!(result, EnrichmentResult::not_found("zzzz no such place"));
    }

    #[tokio::test]
    async fn test_results_keeps_order_and_skips_linkless_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("num", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"title": "A", "link": "https://a.example"},
                    {"title": "No link"},
                    {"title": "B", "link": "https://b.example"}
                ]
            })))
            .mount(&server)
            .await;

        let hits = search_for(&server).results("parks", 3).await.unwrap();
        let links: Vec<&str> = hits.iter().map(|h| h.link.as_str()).collect();
        assert_eq!(links, vec!["https://a.example", "https://b.example"]);
    }

    #[tokio::test]
    async fn test_repeated_lookup_is_identical() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"title": "Gas Works Park", "link": "https://example.org/gasworks"}]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let search = search_for(&server);
        let first = search.lookup("Gas Works Park").await.unwrap();
        let second = search.lookup("Gas Works Park").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_api_error_surfaces_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "API key not valid"}
            })))
            .mount(&server)
            .await;

        let err = search_for(&server).lookup("anything").await.unwrap_err();
        match err {
            LookupError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
