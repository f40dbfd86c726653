//! Run context: the artifact map owned by one pipeline execution.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::artifact::StageArtifact;

/// Artifacts accumulated during a single end-to-end pipeline run.
///
/// Created at run start, discarded at run end. A stage may only read
/// artifacts produced by stages that precede it; each retry of a stage
/// overwrites its artifact rather than appending. One context is owned by
/// exactly one run and is never shared across concurrent runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunContext {
    artifacts: HashMap<String, StageArtifact>,
}

impl RunContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an artifact under a key, overwriting any previous value
    pub fn insert(&mut self, key: impl Into<String>, artifact: StageArtifact) {
        self.artifacts.insert(key.into(), artifact);
    }

    /// Get an artifact by key
    pub fn get(&self, key: &str) -> Option<&StageArtifact> {
        self.artifacts.get(key)
    }

    /// Get an artifact's content by key
    pub fn content(&self, key: &str) -> Option<&str> {
        self.artifacts.get(key).map(|a| a.content.as_str())
    }

    /// Whether an artifact is present under this key
    pub fn contains(&self, key: &str) -> bool {
        self.artifacts.contains_key(key)
    }

    /// Iterate over the stored artifact keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.artifacts.keys().map(|k| k.as_str())
    }

    /// Number of stored artifacts
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether the context holds no artifacts
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifact::keys;

    #[test]
    fn test_insert_and_get() {
        let mut ctx = RunContext::new();
        ctx.insert(keys::SCRIPT_OUTLINE, StageArtifact::new("planner", "outline"));

        assert!(ctx.contains(keys::SCRIPT_OUTLINE));
        assert_eq!(ctx.content(keys::SCRIPT_OUTLINE), Some("outline"));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut ctx = RunContext::new();
        ctx.insert(keys::SCRIPT_OUTLINE, StageArtifact::new("planner", "first"));
        ctx.insert(keys::SCRIPT_OUTLINE, StageArtifact::new("planner", "second"));

        assert_eq!(ctx.content(keys::SCRIPT_OUTLINE), Some("second"));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_missing_key() {
        let ctx = RunContext::new();
        assert!(ctx.get(keys::SCRIPT).is_none());
        assert!(!ctx.contains(keys::SCRIPT));
        assert!(ctx.is_empty());
    }
}
