//! Run reports: what happened during one pipeline execution.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::artifact::keys;
use super::context::RunContext;
use super::outcome::RetryOutcome;
use super::review::ReviewVerdict;

/// One stage execution and its retry outcome
#[derive(Debug, Clone, Serialize)]
pub struct StageRecord {
    pub stage: String,
    pub outcome: RetryOutcome,
}

/// One editor review of a named artifact
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRecord {
    /// Artifact key the editor was asked to validate
    pub target: String,
    pub verdict: ReviewVerdict,
}

/// Summary of a completed pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub id: Uuid,
    pub topic: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Stage executions in orchestration order
    pub stages: Vec<StageRecord>,

    /// Editor reviews in the order they were performed
    pub reviews: Vec<ReviewRecord>,

    /// Final artifact snapshot
    pub context: RunContext,
}

impl RunReport {
    /// The most recent editor verdict for a target artifact, if any
    pub fn latest_verdict(&self, target: &str) -> Option<ReviewVerdict> {
        self.reviews
            .iter()
            .rev()
            .find(|r| r.target == target)
            .map(|r| r.verdict)
    }

    /// Whether every deliverable ended its last review approved
    pub fn approved(&self) -> bool {
        [keys::SCRIPT_OUTLINE, keys::SCRIPT, keys::PRODUCTION_SCRIPT]
            .iter()
            .all(|target| {
                self.latest_verdict(target)
                    .map(|v| v.is_approved())
                    .unwrap_or(false)
            })
    }

    /// The final production script, if the director stage ran
    pub fn production_script(&self) -> Option<&str> {
        self.context.content(keys::PRODUCTION_SCRIPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with_reviews(reviews: Vec<ReviewRecord>) -> RunReport {
        RunReport {
            id: Uuid::new_v4(),
            topic: "test".to_string(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            stages: Vec::new(),
            reviews,
            context: RunContext::new(),
        }
    }

    #[test]
    fn test_latest_verdict_wins() {
        let report = report_with_reviews(vec![
            ReviewRecord {
                target: keys::SCRIPT_OUTLINE.to_string(),
                verdict: ReviewVerdict::RequiresChanges,
            },
            ReviewRecord {
                target: keys::SCRIPT_OUTLINE.to_string(),
                verdict: ReviewVerdict::Approved,
            },
        ]);

        assert_eq!(
            report.latest_verdict(keys::SCRIPT_OUTLINE),
            Some(ReviewVerdict::Approved)
        );
    }

    #[test]
    fn test_approved_requires_all_targets() {
        let report = report_with_reviews(vec![
            ReviewRecord {
                target: keys::SCRIPT_OUTLINE.to_string(),
                verdict: ReviewVerdict::Approved,
            },
            ReviewRecord {
                target: keys::SCRIPT.to_string(),
                verdict: ReviewVerdict::Approved,
            },
        ]);

        // production_script was never reviewed
        assert!(!report.approved());
    }

    #[test]
    fn test_fully_approved() {
        let report = report_with_reviews(
            [keys::SCRIPT_OUTLINE, keys::SCRIPT, keys::PRODUCTION_SCRIPT]
                .iter()
                .map(|t| ReviewRecord {
                    target: t.to_string(),
                    verdict: ReviewVerdict::Approved,
                })
                .collect(),
        );

        assert!(report.approved());
    }
}
