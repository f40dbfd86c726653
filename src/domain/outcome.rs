//! Outcome of a bounded retry execution.

use serde::{Deserialize, Serialize};

/// Tagged result of a `BoundedRetryRunner` execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum RetryOutcome {
    /// The completion predicate was satisfied, or no predicate was configured.
    Completed,

    /// The iteration bound was reached without the predicate settling.
    /// A best-effort artifact was produced but not verified; callers must
    /// treat it accordingly. Not itself an error.
    Exhausted,

    /// The predicate raised an explicit escalation and the loop halted
    /// immediately. Not a success, even though the loop stopped.
    Escalated { message: String },
}

impl RetryOutcome {
    /// Whether the stage finished with its predicate satisfied
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Whether the loop halted on an escalation
    pub fn is_escalated(&self) -> bool {
        matches!(self, Self::Escalated { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_predicates() {
        assert!(RetryOutcome::Completed.is_completed());
        assert!(!RetryOutcome::Exhausted.is_completed());

        let escalated = RetryOutcome::Escalated {
            message: "missing outline".to_string(),
        };
        assert!(escalated.is_escalated());
        assert!(!escalated.is_completed());
    }

    #[test]
    fn test_outcome_serialization() {
        let escalated = RetryOutcome::Escalated {
            message: "m".to_string(),
        };
        let json = serde_json::to_string(&escalated).unwrap();
        assert!(json.contains("escalated"));

        let parsed: RetryOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, escalated);
    }
}
