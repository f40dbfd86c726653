//! Editor review results and their wire format.
//!
//! The editor stage writes a `validation_result` artifact whose first status
//! line carries exactly one of the tokens `APPROVED` / `REQUIRES CHANGES`,
//! followed by free-form structured feedback.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status token emitted by the editor when a deliverable passes review
pub const STATUS_APPROVED: &str = "APPROVED";

/// Status token emitted by the editor when a deliverable needs revision
pub const STATUS_REQUIRES_CHANGES: &str = "REQUIRES CHANGES";

/// Verdict extracted from an editor review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewVerdict {
    /// The deliverable complies with the guidelines
    Approved,

    /// The deliverable needs revision. Normal control flow, not an error:
    /// the caller revises the stage directive and re-enters the stage.
    RequiresChanges,
}

impl ReviewVerdict {
    /// Whether this verdict lets the pipeline move forward
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// A parsed editor review: verdict plus the feedback that followed it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub verdict: ReviewVerdict,
    pub feedback: String,
}

impl Review {
    /// Parse an editor reply.
    ///
    /// Scans for the first line containing exactly one of the status tokens;
    /// everything after that line is the feedback. A line containing both
    /// tokens is a template echo and is skipped. A reply with no status line
    /// is malformed — approval is never inferred.
    pub fn parse(text: &str) -> Result<Self, ReviewParseError> {
        for (idx, line) in text.lines().enumerate() {
            let requires = line.contains(STATUS_REQUIRES_CHANGES);
            let approved = line.contains(STATUS_APPROVED);

            let verdict = match (approved, requires) {
                (true, true) | (false, false) => continue,
                (_, true) => ReviewVerdict::RequiresChanges,
                (true, _) => ReviewVerdict::Approved,
            };

            let feedback = text
                .lines()
                .skip(idx + 1)
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string();

            return Ok(Self { verdict, feedback });
        }

        Err(ReviewParseError::MissingStatus)
    }
}

/// Failure to extract a verdict from an editor reply
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewParseError {
    #[error("editor reply contains no APPROVED / REQUIRES CHANGES status line")]
    MissingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_approved() {
        let text = "**COMPLIANCE STATUS: APPROVED**\n\nAll guidelines are met.";
        let review = Review::parse(text).unwrap();

        assert_eq!(review.verdict, ReviewVerdict::Approved);
        assert!(review.verdict.is_approved());
        assert_eq!(review.feedback, "All guidelines are met.");
    }

    #[test]
    fn test_parse_requires_changes() {
        let text = "**COMPLIANCE STATUS: REQUIRES CHANGES**\n\n**Issues Found:**\n1. Title format";
        let review = Review::parse(text).unwrap();

        assert_eq!(review.verdict, ReviewVerdict::RequiresChanges);
        assert!(review.feedback.starts_with("**Issues Found:**"));
    }

    #[test]
    fn test_parse_skips_template_echo() {
        // A line quoting the whole template carries both tokens and must
        // not decide the verdict.
        let text = "Format: [APPROVED/REQUIRES CHANGES]\nCOMPLIANCE STATUS: APPROVED\nLooks good.";
        let review = Review::parse(text).unwrap();

        assert_eq!(review.verdict, ReviewVerdict::Approved);
        assert_eq!(review.feedback, "Looks good.");
    }

    #[test]
    fn test_parse_missing_status_is_error() {
        let result = Review::parse("Great outline, ship it.");
        assert_eq!(result.unwrap_err(), ReviewParseError::MissingStatus);
    }

    #[test]
    fn test_parse_empty_feedback() {
        let review = Review::parse("COMPLIANCE STATUS: APPROVED").unwrap();
        assert_eq!(review.verdict, ReviewVerdict::Approved);
        assert!(review.feedback.is_empty());
    }
}
