//! In-process fakes for the completion model and lookup services.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::llm_client::{CompletionModel, LlmError};
use crate::lookup::{EnrichmentLookup, EnrichmentResult, Finding, LookupError};

/// Returns canned completions in order and records every prompt it receives.
pub struct ScriptedModel {
    responses: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(String, f32)>>,
    fail: bool,
    delay: Option<Duration>,
}

impl ScriptedModel {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            calls: Mutex::new(Vec::new()),
            fail: false,
            delay: None,
        }
    }

    /// Every call fails as if the API returned 500.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::<String>::new())
        }
    }

    /// Sleeps before answering; pair with a paused clock.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(["too late"])
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn temperatures(&self) -> Vec<f32> {
        self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

#[async_trait]
impl CompletionModel for ScriptedModel {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), temperature));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(LlmError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::EmptyContent)
    }
}

/// Deterministic lookup backed by a fixed query → finding table.
pub struct StaticLookup {
    name: &'static str,
    findings: HashMap<String, Finding>,
    queries: Mutex<Vec<String>>,
    fail: bool,
}

impl StaticLookup {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            findings: HashMap::new(),
            queries: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            fail: true,
            ..Self::new(name)
        }
    }

    pub fn with_link(mut self, query: &str, link: &str) -> Self {
        self.findings.insert(
            query.to_string(),
            Finding::Link {
                title: query.to_string(),
                link: link.to_string(),
            },
        );
        self
    }

    pub fn with_summary(mut self, query: &str, summary: &str) -> Self {
        self.findings.insert(
            query.to_string(),
            Finding::Summary {
                title: query.to_string(),
                summary: summary.to_string(),
            },
        );
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl EnrichmentLookup for StaticLookup {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn lookup(&self, query: &str) -> Result<EnrichmentResult, LookupError> {
        self.queries.lock().unwrap().push(query.to_string());

        if self.fail {
            return Err(LookupError::Api {
                status: 503,
                message: "lookup unavailable".to_string(),
            });
        }

        Ok(match self.findings.get(query) {
            Some(finding) => EnrichmentResult::found(query, finding.clone()),
            None => EnrichmentResult::not_found(query),
        })
    }
}
