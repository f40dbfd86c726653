//! Completion predicate guarding the outline stage.

use crate::domain::{keys, RunContext};

use super::retry::{CompletionPredicate, CompletionSignal};

/// Diagnostic raised when the outline stage finished without an outline
pub const MISSING_OUTLINE_MESSAGE: &str =
    "No script outline found. Please generate an outline first.";

/// Escalates when `script_outline` is absent or empty after the wrapped
/// stage ran; otherwise reports satisfied.
///
/// This is a presence check only. Content and structure review is delegated
/// to the editor stage, which is a full generation call. A whitespace-only
/// outline counts as present.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineValidationGate;

impl CompletionPredicate for OutlineValidationGate {
    fn name(&self) -> &str {
        "outline_validation"
    }

    fn evaluate(&self, ctx: &RunContext) -> CompletionSignal {
        match ctx.content(keys::SCRIPT_OUTLINE) {
            Some(outline) if !outline.is_empty() => CompletionSignal::Satisfied,
            _ => CompletionSignal::Escalate(MISSING_OUTLINE_MESSAGE.to_string()),
        }
    }
}
