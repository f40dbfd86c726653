//! Artifacts produced by pipeline stages.
//!
//! An artifact is the named text output of one stage, stored in the run
//! context under a well-known key and consumed by later stages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Well-known artifact keys.
///
/// These are the wire contract between stages: renaming one requires
/// updating every stage that consumes it.
pub mod keys {
    /// Topic provided by the caller at run start; read by the research stage.
    pub const RESEARCH_TOPIC: &str = "research_topic";

    /// Research summary produced by the researcher.
    pub const RESEARCH_FINDINGS: &str = "research_findings";

    /// Outline produced by the planner.
    pub const SCRIPT_OUTLINE: &str = "script_outline";

    /// Full script produced by the writer.
    pub const SCRIPT: &str = "script";

    /// Production-ready script produced by the director.
    pub const PRODUCTION_SCRIPT: &str = "production_script";

    /// Compliance review produced by the editor.
    pub const VALIDATION_RESULT: &str = "validation_result";
}

/// A named text output produced by a pipeline stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageArtifact {
    /// Name of the stage that produced this artifact
    pub stage: String,

    /// The artifact text
    pub content: String,

    /// When the artifact was created
    pub created_at: DateTime<Utc>,
}

impl StageArtifact {
    /// Create a new artifact from stage output
    pub fn new(stage: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Whether the artifact carries no content at all
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
