//! showrunner - channel-aware agent pipeline for YouTube script production
//!
//! A pipeline of generation-backed stages drafts a video script, personalized
//! with creator/channel metadata:
//!
//! - Research (optional) gathers findings for a topic
//! - Outline plans the script, guarded by a presence gate
//! - Write turns the outline into a script
//! - Direct embeds visual guidance into a production-ready script
//! - Validate (the editor) reviews each deliverable, approving it or
//!   requesting changes that feed the next revision cycle
//!
//! Each stage is wrapped in a bounded retry runner; artifacts flow between
//! stages through a run context owned by exactly one pipeline execution.
//!
//! # Modules
//!
//! - `adapters`: external generation and search backends
//! - `channel`: channel profile, storage, and instruction composition
//! - `core`: stages, retry runner, validation gate, orchestrator
//! - `domain`: artifacts, run context, outcomes, reviews, reports
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Configure the channel once
//! showrunner profile setup
//!
//! # Produce a script
//! showrunner run "feature stores in production" --research
//! ```

pub mod adapters;
pub mod channel;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use crate::channel::{ChannelProfile, ProfileStore};
pub use crate::core::{
    BoundedRetryRunner, Orchestrator, OrchestratorSettings, OutlineValidationGate, RunRequest,
    ScriptSession,
};
pub use crate::domain::{RetryOutcome, Review, ReviewVerdict, RunContext, RunReport, StageArtifact};
