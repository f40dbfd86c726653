//! Web-search backend over a SearxNG-compatible JSON endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::SearchBackend;

/// One search hit
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Search backend querying a SearxNG-compatible HTTP endpoint
pub struct HttpSearchBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSearchBackend {
    /// Create a backend for an endpoint with a per-query timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build search HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Create a backend from the resolved configuration, if search is enabled
    pub fn from_config(config: &crate::config::ResolvedConfig) -> Result<Option<Self>> {
        match &config.search.endpoint {
            Some(endpoint) => Ok(Some(Self::new(
                endpoint,
                Duration::from_secs(config.search.timeout_seconds),
            )?)),
            None => Ok(None),
        }
    }
}

/// SearxNG JSON response shape (only the fields we consume)
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    fn name(&self) -> &str {
        "searx"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = format!("{}/search", self.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .with_context(|| format!("Search request failed for query '{}'", query))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Search endpoint returned {} for query '{}'",
                response.status(),
                query
            );
        }

        let body: SearchResponse = response
            .json()
            .await
            .context("Failed to parse search response")?;

        Ok(body
            .results
            .into_iter()
            .map(|r| SearchResult {
                title: r.title,
                url: r.url,
                snippet: r.content.unwrap_or_default(),
            })
            .collect())
    }
}
