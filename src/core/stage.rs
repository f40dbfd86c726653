//! Stage definitions and the agents that execute them.
//!
//! A `StageSpec` is data: which artifacts a stage reads, which single
//! artifact it writes, and its base brief. A `StageAgent` binds a spec to
//! the composed directive and the external backends.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::adapters::{GenerationBackend, SearchBackend, SearchResult};
use crate::channel::{channel_aware_instruction, ChannelProfile};
use crate::domain::{keys, RunContext, StageArtifact, StageError};

use super::prompts;

/// The named steps of the script-production workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Research,
    Outline,
    Write,
    Direct,
    Validate,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::Outline => "outline",
            Self::Write => "write",
            Self::Direct => "direct",
            Self::Validate => "validate",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binding of a context artifact to a stage input
#[derive(Debug, Clone)]
pub struct InputBinding {
    pub key: &'static str,
    pub required: bool,
}

impl InputBinding {
    fn required(key: &'static str) -> Self {
        Self { key, required: true }
    }

    fn optional(key: &'static str) -> Self {
        Self {
            key,
            required: false,
        }
    }
}

/// Static description of one pipeline stage
#[derive(Debug, Clone)]
pub struct StageSpec {
    pub kind: StageKind,
    /// Agent name used in logs and artifact provenance
    pub name: &'static str,
    pub base_instruction: &'static str,
    pub inputs: Vec<InputBinding>,
    pub output_key: &'static str,
    /// Whether the stage consults the search backend before generating
    pub uses_search: bool,
}

impl StageSpec {
    /// Reads `research_topic`, writes `research_findings`
    pub fn researcher() -> Self {
        Self {
            kind: StageKind::Research,
            name: "researcher",
            base_instruction: prompts::RESEARCHER,
            inputs: vec![InputBinding::required(keys::RESEARCH_TOPIC)],
            output_key: keys::RESEARCH_FINDINGS,
            uses_search: true,
        }
    }

    /// Reads `research_topic` and optional `research_findings`, writes `script_outline`
    pub fn planner() -> Self {
        Self {
            kind: StageKind::Outline,
            name: "planner",
            base_instruction: prompts::PLANNER,
            inputs: vec![
                InputBinding::required(keys::RESEARCH_TOPIC),
                InputBinding::optional(keys::RESEARCH_FINDINGS),
            ],
            output_key: keys::SCRIPT_OUTLINE,
            uses_search: false,
        }
    }

    /// Reads `script_outline`, writes `script`
    pub fn writer() -> Self {
        Self {
            kind: StageKind::Write,
            name: "writer",
            base_instruction: prompts::WRITER,
            inputs: vec![InputBinding::required(keys::SCRIPT_OUTLINE)],
            output_key: keys::SCRIPT,
            uses_search: false,
        }
    }

    /// Reads `script`, writes `production_script`
    pub fn director() -> Self {
        Self {
            kind: StageKind::Direct,
            name: "director",
            base_instruction: prompts::DIRECTOR,
            inputs: vec![InputBinding::required(keys::SCRIPT)],
            output_key: keys::PRODUCTION_SCRIPT,
            uses_search: false,
        }
    }

    /// Reads the artifact it is asked to validate, writes `validation_result`
    pub fn editor(target_key: &'static str) -> Self {
        Self {
            kind: StageKind::Validate,
            name: "editor",
            base_instruction: prompts::EDITOR,
            inputs: vec![InputBinding::required(target_key)],
            output_key: keys::VALIDATION_RESULT,
            uses_search: false,
        }
    }
}

/// Settings shared by every stage agent of one pipeline
#[derive(Debug, Clone)]
pub struct AgentSettings {
    /// Per-generation-call timeout
    pub generation_timeout: Duration,
    /// Maximum search queries per research session
    pub max_search_queries: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            generation_timeout: Duration::from_secs(300),
            max_search_queries: 6,
        }
    }
}

/// One pipeline stage bound to its backends and composed directive
pub struct StageAgent {
    spec: StageSpec,
    directive: String,
    generation: Arc<dyn GenerationBackend>,
    search: Option<Arc<dyn SearchBackend>>,
    settings: AgentSettings,
}

impl StageAgent {
    /// Build an agent: the directive is the stage brief merged with the
    /// channel context, fixed for the lifetime of the agent unless amended.
    pub fn new(
        spec: StageSpec,
        profile: &ChannelProfile,
        generation: Arc<dyn GenerationBackend>,
        search: Option<Arc<dyn SearchBackend>>,
        settings: AgentSettings,
    ) -> Self {
        let directive = channel_aware_instruction(spec.base_instruction, profile);
        Self {
            spec,
            directive,
            generation,
            search,
            settings,
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn kind(&self) -> StageKind {
        self.spec.kind
    }

    /// Key under which the runner stores this stage's artifact
    pub fn output_key(&self) -> &'static str {
        self.spec.output_key
    }

    /// The fully composed directive for this agent
    pub fn directive(&self) -> &str {
        &self.directive
    }

    /// Append revision requirements (e.g. editor feedback) to the directive
    pub fn amend_directive(&mut self, addition: &str) {
        self.directive
            .push_str(&format!("\n\n## REVISION REQUIREMENTS\n{addition}"));
    }

    /// Run one generation call for this stage.
    ///
    /// Gathers bound inputs from the context (a missing required input is a
    /// `MissingArtifact` error), optionally collects search context, then
    /// invokes the generation backend once. Never retries.
    pub async fn invoke(&self, ctx: &RunContext) -> Result<StageArtifact, StageError> {
        let mut inputs: Vec<(String, String)> = Vec::new();

        for binding in &self.spec.inputs {
            match ctx.content(binding.key) {
                Some(content) => inputs.push((binding.key.to_string(), content.to_string())),
                None if binding.required => {
                    return Err(StageError::missing(self.spec.name, binding.key))
                }
                None => debug!(
                    stage = self.spec.name,
                    key = binding.key,
                    "optional input absent"
                ),
            }
        }

        if self.spec.uses_search {
            if let Some(search) = &self.search {
                if let Some(block) = self.search_context(ctx, search.as_ref()).await {
                    inputs.push(("search_results".to_string(), block));
                }
            }
        }

        let output = self
            .generation
            .generate(&self.directive, &inputs, self.settings.generation_timeout)
            .await
            .map_err(|e| StageError::generation(self.spec.name, e))?;

        Ok(StageArtifact::new(self.spec.name, output.content))
    }

    /// Collect search results for the run topic into one markdown block.
    ///
    /// A failed query is logged and skipped; research continues with the
    /// remaining queries rather than aborting.
    async fn search_context(&self, ctx: &RunContext, search: &dyn SearchBackend) -> Option<String> {
        let topic = ctx.content(keys::RESEARCH_TOPIC)?;
        let queries = research_queries(topic, self.settings.max_search_queries);

        let mut sections = Vec::new();
        for query in &queries {
            match search.search(query).await {
                Ok(results) if !results.is_empty() => {
                    sections.push(format_results(query, &results));
                }
                Ok(_) => debug!(query = %query, "search returned no results"),
                Err(e) => warn!(query = %query, error = %e, "search query failed, continuing"),
            }
        }

        if sections.is_empty() {
            None
        } else {
            Some(sections.join("\n\n"))
        }
    }
}

/// Platform-targeted queries for a research topic, in priority order
fn research_queries(topic: &str, limit: usize) -> Vec<String> {
    [
        format!("{topic} latest trends"),
        format!("{topic} best practices"),
        format!("site:youtube.com {topic}"),
        format!("site:stackoverflow.com {topic}"),
        format!("site:reddit.com {topic}"),
        format!("{topic} common errors"),
    ]
    .into_iter()
    .take(limit)
    .collect()
}

/// Render one query's results as a markdown section
fn format_results(query: &str, results: &[SearchResult]) -> String {
    let mut out = format!("### {query}");
    for result in results.iter().take(5) {
        out.push_str(&format!("\n- {} ({})", result.title, result.url));
        if !result.snippet.is_empty() {
            out.push_str(&format!("\n  {}", result.snippet));
        }
    }
    out
}
