//! Orchestrates the script-production workflow.
//!
//! Stages execute strictly forward — Research (optional) → Outline →
//! Validate → Write → Validate → Direct → Validate — except for the
//! editor-mediated revision cycles, which re-enter a stage with its
//! directive amended by review feedback. Revision cycles are bounded by
//! caller judgment, never by an internal counter.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::adapters::{GenerationBackend, SearchBackend};
use crate::channel::ChannelProfile;
use crate::domain::{
    keys, Review, ReviewRecord, RetryOutcome, RunContext, RunReport, StageArtifact, StageRecord,
};

use super::gate::OutlineValidationGate;
use super::retry::BoundedRetryRunner;
use super::stage::{AgentSettings, StageAgent, StageSpec};

/// Settings governing one orchestrator's pipelines
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// Retry bound for the research stage; every other stage uses 1
    pub max_research_iterations: u32,

    /// Settings shared by all stage agents
    pub agent: AgentSettings,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            max_research_iterations: 1,
            agent: AgentSettings::default(),
        }
    }
}

impl OrchestratorSettings {
    /// Build settings from the resolved configuration
    pub fn from_config(config: &crate::config::ResolvedConfig) -> Self {
        Self {
            max_research_iterations: config.pipeline.max_research_iterations,
            agent: AgentSettings {
                generation_timeout: Duration::from_secs(config.generation.timeout_seconds),
                max_search_queries: config.search.max_queries,
            },
        }
    }
}

/// Parameters for one automatic pipeline run
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Video topic, stored under `research_topic` at run start
    pub topic: String,

    /// Whether to run the optional research stage first
    pub research: bool,

    /// Extra outline requirements appended to the planner directive
    pub outline_requirements: Option<String>,

    /// Caller-supplied budget for feedback-driven revision cycles per phase
    pub max_revision_cycles: u32,
}

impl RunRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            research: false,
            outline_requirements: None,
            max_revision_cycles: 2,
        }
    }

    pub fn with_research(mut self, research: bool) -> Self {
        self.research = research;
        self
    }

    pub fn with_outline_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.outline_requirements = Some(requirements.into());
        self
    }

    pub fn with_max_revision_cycles(mut self, cycles: u32) -> Self {
        self.max_revision_cycles = cycles;
        self
    }
}

/// Deliverables the editor can be asked to validate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewTarget {
    Outline,
    Script,
    Production,
}

impl ReviewTarget {
    /// Artifact key the editor reads for this target
    pub fn artifact_key(&self) -> &'static str {
        match self {
            Self::Outline => keys::SCRIPT_OUTLINE,
            Self::Script => keys::SCRIPT,
            Self::Production => keys::PRODUCTION_SCRIPT,
        }
    }
}

/// Main pipeline orchestrator
pub struct Orchestrator {
    generation: Arc<dyn GenerationBackend>,
    search: Option<Arc<dyn SearchBackend>>,
    profile: ChannelProfile,
    settings: OrchestratorSettings,
}

impl Orchestrator {
    /// Create an orchestrator over the given backends and channel profile.
    ///
    /// The profile is captured by value: it stays immutable for every run
    /// started from this orchestrator.
    pub fn new(
        generation: Arc<dyn GenerationBackend>,
        search: Option<Arc<dyn SearchBackend>>,
        profile: ChannelProfile,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            generation,
            search,
            profile,
            settings,
        }
    }

    /// Start a stepwise session for a topic.
    ///
    /// Use this when an embedding application mediates the revision cycles
    /// itself (e.g. interactively).
    pub fn session(&self, topic: impl Into<String>) -> ScriptSession {
        ScriptSession::new(
            topic,
            &self.profile,
            Arc::clone(&self.generation),
            self.search.clone(),
            &self.settings,
        )
    }

    /// Run the full pipeline for a request.
    ///
    /// Editor feedback drives automatic directive revision up to the
    /// request's cycle budget; a phase that is still rejected afterwards is
    /// carried forward as best-effort and recorded in the report.
    #[instrument(skip(self, request), fields(topic = %request.topic))]
    pub async fn run(&self, request: &RunRequest) -> Result<RunReport> {
        info!("Starting script pipeline");

        let mut session = self.session(&request.topic);

        if request.research {
            let outcome = session.research().await?;
            if outcome == RetryOutcome::Exhausted {
                warn!("research exhausted its iteration bound; continuing with best-effort findings");
            }
        }

        if let Some(ref requirements) = request.outline_requirements {
            session.amend_plan_requirements(requirements);
        }

        // Outline phase
        let mut cycles = 0;
        loop {
            if let RetryOutcome::Escalated { message } = session.plan().await? {
                anyhow::bail!("{message}");
            }

            let review = session.review(ReviewTarget::Outline).await?;
            if review.verdict.is_approved() {
                info!("outline approved");
                break;
            }
            if cycles >= request.max_revision_cycles {
                warn!(cycles, "outline not approved within the revision budget");
                break;
            }
            cycles += 1;
            info!(cycle = cycles, "outline requires changes, revising");
            session.amend_plan_requirements(&review.feedback);
        }

        // Write phase
        let mut cycles = 0;
        loop {
            session.write().await?;

            let review = session.review(ReviewTarget::Script).await?;
            if review.verdict.is_approved() {
                info!("script approved");
                break;
            }
            if cycles >= request.max_revision_cycles {
                warn!(cycles, "script not approved within the revision budget");
                break;
            }
            cycles += 1;
            info!(cycle = cycles, "script requires changes, revising");
            session.amend_write_requirements(&review.feedback);
        }

        // Direct phase — terminal once approved
        let mut cycles = 0;
        loop {
            session.direct().await?;

            let review = session.review(ReviewTarget::Production).await?;
            if review.verdict.is_approved() {
                info!("production script approved");
                break;
            }
            if cycles >= request.max_revision_cycles {
                warn!(cycles, "production script not approved within the revision budget");
                break;
            }
            cycles += 1;
            info!(cycle = cycles, "production script requires changes, revising");
            session.amend_direct_requirements(&review.feedback);
        }

        let report = session.into_report();
        info!(run_id = %report.id, approved = report.approved(), "Pipeline finished");
        Ok(report)
    }
}

/// One pipeline execution, driven stage by stage.
///
/// Owns the run context exclusively; concurrent runs must use independent
/// sessions.
pub struct ScriptSession {
    id: Uuid,
    topic: String,
    started_at: DateTime<Utc>,
    ctx: RunContext,

    researcher: StageAgent,
    planner: StageAgent,
    writer: StageAgent,
    director: StageAgent,
    outline_editor: StageAgent,
    script_editor: StageAgent,
    production_editor: StageAgent,

    research_bound: u32,
    stages: Vec<StageRecord>,
    reviews: Vec<ReviewRecord>,
}

impl ScriptSession {
    fn new(
        topic: impl Into<String>,
        profile: &ChannelProfile,
        generation: Arc<dyn GenerationBackend>,
        search: Option<Arc<dyn SearchBackend>>,
        settings: &OrchestratorSettings,
    ) -> Self {
        let topic = topic.into();

        let agent = |spec: StageSpec| {
            StageAgent::new(
                spec,
                profile,
                Arc::clone(&generation),
                search.clone(),
                settings.agent.clone(),
            )
        };

        let mut ctx = RunContext::new();
        ctx.insert(keys::RESEARCH_TOPIC, StageArtifact::new("input", &topic));

        Self {
            id: Uuid::new_v4(),
            topic,
            started_at: Utc::now(),
            ctx,
            researcher: agent(StageSpec::researcher()),
            planner: agent(StageSpec::planner()),
            writer: agent(StageSpec::writer()),
            director: agent(StageSpec::director()),
            outline_editor: agent(StageSpec::editor(keys::SCRIPT_OUTLINE)),
            script_editor: agent(StageSpec::editor(keys::SCRIPT)),
            production_editor: agent(StageSpec::editor(keys::PRODUCTION_SCRIPT)),
            research_bound: settings.max_research_iterations,
            stages: Vec::new(),
            reviews: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn context(&self) -> &RunContext {
        &self.ctx
    }

    pub fn outline(&self) -> Option<&str> {
        self.ctx.content(keys::SCRIPT_OUTLINE)
    }

    pub fn script(&self) -> Option<&str> {
        self.ctx.content(keys::SCRIPT)
    }

    pub fn production_script(&self) -> Option<&str> {
        self.ctx.content(keys::PRODUCTION_SCRIPT)
    }

    /// Run the research stage under its configured iteration bound
    pub async fn research(&mut self) -> Result<RetryOutcome> {
        let runner = BoundedRetryRunner::new(self.research_bound);
        let outcome = runner.run(&self.researcher, &mut self.ctx, None).await?;
        self.record_stage(self.researcher.name(), outcome.clone());
        Ok(outcome)
    }

    /// Run the outline stage (single attempt, guarded by the outline gate)
    pub async fn plan(&mut self) -> Result<RetryOutcome> {
        let runner = BoundedRetryRunner::single_attempt();
        let outcome = runner
            .run(&self.planner, &mut self.ctx, Some(&OutlineValidationGate))
            .await?;
        self.record_stage(self.planner.name(), outcome.clone());
        Ok(outcome)
    }

    /// Run the write stage (single attempt)
    pub async fn write(&mut self) -> Result<RetryOutcome> {
        let runner = BoundedRetryRunner::single_attempt();
        let outcome = runner.run(&self.writer, &mut self.ctx, None).await?;
        self.record_stage(self.writer.name(), outcome.clone());
        Ok(outcome)
    }

    /// Run the direct stage (single attempt)
    pub async fn direct(&mut self) -> Result<RetryOutcome> {
        let runner = BoundedRetryRunner::single_attempt();
        let outcome = runner.run(&self.director, &mut self.ctx, None).await?;
        self.record_stage(self.director.name(), outcome.clone());
        Ok(outcome)
    }

    /// Run the editor against a deliverable and parse its verdict
    pub async fn review(&mut self, target: ReviewTarget) -> Result<Review> {
        let editor = match target {
            ReviewTarget::Outline => &self.outline_editor,
            ReviewTarget::Script => &self.script_editor,
            ReviewTarget::Production => &self.production_editor,
        };

        let runner = BoundedRetryRunner::single_attempt();
        let outcome = runner.run(editor, &mut self.ctx, None).await?;
        self.stages.push(StageRecord {
            stage: format!("editor:{}", target.artifact_key()),
            outcome,
        });

        let reply = self
            .ctx
            .content(keys::VALIDATION_RESULT)
            .context("editor produced no validation_result artifact")?;

        let review = Review::parse(reply).with_context(|| {
            format!(
                "malformed editor reply while reviewing '{}'",
                target.artifact_key()
            )
        })?;

        self.reviews.push(ReviewRecord {
            target: target.artifact_key().to_string(),
            verdict: review.verdict,
        });

        Ok(review)
    }

    /// Fold revised requirements into the planner directive
    pub fn amend_plan_requirements(&mut self, requirements: &str) {
        self.planner.amend_directive(requirements);
    }

    /// Fold revised requirements into the writer directive
    pub fn amend_write_requirements(&mut self, requirements: &str) {
        self.writer.amend_directive(requirements);
    }

    /// Fold revised requirements into the director directive
    pub fn amend_direct_requirements(&mut self, requirements: &str) {
        self.director.amend_directive(requirements);
    }

    fn record_stage(&mut self, stage: &'static str, outcome: RetryOutcome) {
        self.stages.push(StageRecord {
            stage: stage.to_string(),
            outcome,
        });
    }

    /// Finish the session, consuming it into a report
    pub fn into_report(self) -> RunReport {
        RunReport {
            id: self.id,
            topic: self.topic,
            started_at: self.started_at,
            finished_at: Utc::now(),
            stages: self.stages,
            reviews: self.reviews,
            context: self.ctx,
        }
    }
}
