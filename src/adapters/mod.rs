//! Backend interfaces for external services.
//!
//! Backends provide a unified interface to the external text-generation and
//! web-search services the pipeline stages call into.

pub mod llm_cli;
pub mod search;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

// Re-export the concrete backends
pub use llm_cli::LlmCliBackend;
pub use search::{HttpSearchBackend, SearchResult};

/// Output from a generation call
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// The content returned by the backend
    pub content: String,

    /// Tokens used (if available)
    pub tokens_used: Option<u64>,
}

impl GenerationOutput {
    /// Create a new generation output with just content
    pub fn new(content: String) -> Self {
        Self {
            content,
            tokens_used: None,
        }
    }
}

/// Trait for external text-generation services.
///
/// A call may fail or time out; such failure is surfaced to the caller as a
/// recoverable error and is never retried here.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Human-readable backend name
    fn name(&self) -> &str;

    /// Run one generation call: a directive (system instruction) plus named
    /// inputs from the run context
    async fn generate(
        &self,
        directive: &str,
        inputs: &[(String, String)],
        timeout: Duration,
    ) -> Result<GenerationOutput>;

    /// Check that the backend is reachable
    async fn health_check(&self) -> Result<()>;
}

/// Trait for external web-search services
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Human-readable backend name
    fn name(&self) -> &str;

    /// Run a query and return results in relevance order
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}
