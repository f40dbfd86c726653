//! Typed stage-level failures.

use thiserror::Error;

/// Failures raised while executing a single stage.
///
/// `ValidationRejected` has no variant here on purpose: an editor verdict of
/// `REQUIRES CHANGES` is normal control flow, carried by
/// [`ReviewVerdict`](crate::domain::ReviewVerdict) rather than an error.
#[derive(Debug, Error)]
pub enum StageError {
    /// The external generation call failed or timed out. Recoverable from
    /// the caller's perspective; the stage itself never retries.
    #[error("generation call failed in stage '{stage}': {message}")]
    TransientGeneration { stage: String, message: String },

    /// A required upstream artifact was absent when the stage began.
    /// Stages were invoked out of orchestration order.
    #[error("stage '{stage}' requires artifact '{key}' which is not present")]
    MissingArtifact { stage: String, key: String },
}

impl StageError {
    /// Attach a stage name to a generation failure
    pub fn generation(stage: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Self::TransientGeneration {
            stage: stage.into(),
            message: source.to_string(),
        }
    }

    /// A missing required input binding
    pub fn missing(stage: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingArtifact {
            stage: stage.into(),
            key: key.into(),
        }
    }
}
