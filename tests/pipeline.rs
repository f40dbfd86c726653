//! Pipeline Integration Tests
//!
//! End-to-end orchestration: stage sequencing, editor verdicts, revision
//! cycles, and escalation surfacing.

mod common;

use std::sync::Arc;

use common::{MockGeneration, MockReply};
use showrunner::adapters::GenerationBackend;
use showrunner::channel::ChannelProfile;
use showrunner::core::{
    Orchestrator, OrchestratorSettings, ReviewTarget, RunRequest, MISSING_OUTLINE_MESSAGE,
};
use showrunner::domain::{keys, ReviewVerdict};

const APPROVED: &str = "**COMPLIANCE STATUS: APPROVED**\n\nAll guidelines are met.";
const REQUIRES_CHANGES: &str =
    "**COMPLIANCE STATUS: REQUIRES CHANGES**\n\n**Issues Found:**\n1. Title format is wrong.";

fn orchestrator_with(backend: Arc<MockGeneration>) -> Orchestrator {
    let generation: Arc<dyn GenerationBackend> = backend;
    Orchestrator::new(
        generation,
        None,
        ChannelProfile::default(),
        OrchestratorSettings::default(),
    )
}

#[tokio::test]
async fn test_happy_path_produces_approved_production_script() {
    // plan, review, write, review, direct, review
    let backend = Arc::new(MockGeneration::with_replies([
        MockReply::Ok("## Outline"),
        MockReply::Ok(APPROVED),
        MockReply::Ok("## Script"),
        MockReply::Ok(APPROVED),
        MockReply::Ok("## Production Script [WIDE SHOT]"),
        MockReply::Ok(APPROVED),
    ]));
    let orchestrator = orchestrator_with(backend.clone());

    let request = RunRequest::new("feature stores");
    let report = orchestrator.run(&request).await.unwrap();

    assert_eq!(backend.calls(), 6);
    assert!(report.approved());
    assert_eq!(
        report.production_script(),
        Some("## Production Script [WIDE SHOT]")
    );
    assert_eq!(report.context.content(keys::SCRIPT_OUTLINE), Some("## Outline"));
    assert_eq!(report.context.content(keys::SCRIPT), Some("## Script"));

    // No research was requested
    assert!(!report.context.contains(keys::RESEARCH_FINDINGS));
    assert!(report.stages.iter().all(|s| s.stage != "researcher"));
}

#[tokio::test]
async fn test_empty_outline_escalation_is_surfaced_verbatim() {
    let backend = Arc::new(MockGeneration::with_replies([MockReply::Ok("")]));
    let orchestrator = orchestrator_with(backend.clone());

    let request = RunRequest::new("feature stores");
    let err = orchestrator.run(&request).await.unwrap_err();

    assert_eq!(err.to_string(), MISSING_OUTLINE_MESSAGE);
    // The pipeline halted before any editor call
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_rejected_outline_triggers_revision_cycle() {
    let backend = Arc::new(MockGeneration::with_replies([
        MockReply::Ok("## Outline v1"),
        MockReply::Ok(REQUIRES_CHANGES),
        MockReply::Ok("## Outline v2"),
        MockReply::Ok(APPROVED),
        MockReply::Ok("## Script"),
        MockReply::Ok(APPROVED),
        MockReply::Ok("## Production Script"),
        MockReply::Ok(APPROVED),
    ]));
    let orchestrator = orchestrator_with(backend.clone());

    let request = RunRequest::new("feature stores").with_max_revision_cycles(2);
    let report = orchestrator.run(&request).await.unwrap();

    assert_eq!(backend.calls(), 8);
    assert!(report.approved());
    assert_eq!(report.context.content(keys::SCRIPT_OUTLINE), Some("## Outline v2"));

    // Both outline reviews are on record, rejection first
    let outline_verdicts: Vec<ReviewVerdict> = report
        .reviews
        .iter()
        .filter(|r| r.target == keys::SCRIPT_OUTLINE)
        .map(|r| r.verdict)
        .collect();
    assert_eq!(
        outline_verdicts,
        vec![ReviewVerdict::RequiresChanges, ReviewVerdict::Approved]
    );

    // The second planner call carried the editor feedback as revision
    // requirements; the first did not.
    let directives = backend.directives();
    assert!(!directives[0].contains("## REVISION REQUIREMENTS"));
    assert!(directives[2].contains("## REVISION REQUIREMENTS"));
    assert!(directives[2].contains("Title format is wrong."));
}

#[tokio::test]
async fn test_revision_budget_bounds_the_cycle() {
    // The editor rejects the outline forever; the run stops revising after
    // the caller's budget and carries the deliverable forward unapproved.
    let backend = Arc::new(MockGeneration::with_replies([
        MockReply::Ok("## Outline v1"),
        MockReply::Ok(REQUIRES_CHANGES),
        MockReply::Ok("## Outline v2"),
        MockReply::Ok(REQUIRES_CHANGES),
        MockReply::Ok("## Script"),
        MockReply::Ok(APPROVED),
        MockReply::Ok("## Production Script"),
        MockReply::Ok(APPROVED),
    ]));
    let orchestrator = orchestrator_with(backend.clone());

    let request = RunRequest::new("feature stores").with_max_revision_cycles(1);
    let report = orchestrator.run(&request).await.unwrap();

    assert_eq!(backend.calls(), 8);
    assert!(!report.approved());
    assert_eq!(
        report.latest_verdict(keys::SCRIPT_OUTLINE),
        Some(ReviewVerdict::RequiresChanges)
    );
    assert_eq!(
        report.latest_verdict(keys::PRODUCTION_SCRIPT),
        Some(ReviewVerdict::Approved)
    );
}

#[tokio::test]
async fn test_research_stage_feeds_the_planner() {
    let backend = Arc::new(MockGeneration::with_replies([
        MockReply::Ok("### Executive Summary\nfindings"),
        MockReply::Ok("## Outline"),
        MockReply::Ok(APPROVED),
        MockReply::Ok("## Script"),
        MockReply::Ok(APPROVED),
        MockReply::Ok("## Production Script"),
        MockReply::Ok(APPROVED),
    ]));
    let orchestrator = orchestrator_with(backend.clone());

    let request = RunRequest::new("feature stores").with_research(true);
    let report = orchestrator.run(&request).await.unwrap();

    assert_eq!(backend.calls(), 7);
    assert!(report.approved());
    assert_eq!(
        report.context.content(keys::RESEARCH_FINDINGS),
        Some("### Executive Summary\nfindings")
    );
    assert_eq!(report.stages[0].stage, "researcher");
}

#[tokio::test]
async fn test_outline_requirements_are_folded_into_the_planner_directive() {
    let backend = Arc::new(MockGeneration::with_replies([
        MockReply::Ok("## Outline"),
        MockReply::Ok(APPROVED),
        MockReply::Ok("## Script"),
        MockReply::Ok(APPROVED),
        MockReply::Ok("## Production Script"),
        MockReply::Ok(APPROVED),
    ]));
    let orchestrator = orchestrator_with(backend.clone());

    let request =
        RunRequest::new("feature stores").with_outline_requirements("cover cost tradeoffs");
    orchestrator.run(&request).await.unwrap();

    let directives = backend.directives();
    assert!(directives[0].contains("cover cost tradeoffs"));
}

#[tokio::test]
async fn test_malformed_editor_reply_is_an_error() {
    let backend = Arc::new(MockGeneration::with_replies([
        MockReply::Ok("## Outline"),
        MockReply::Ok("Looks great, ship it."),
    ]));
    let orchestrator = orchestrator_with(backend.clone());

    let request = RunRequest::new("feature stores");
    let err = orchestrator.run(&request).await.unwrap_err();

    assert!(err.to_string().contains("malformed editor reply"));
}

#[tokio::test]
async fn test_stepwise_session_drives_the_same_stages() {
    let backend = Arc::new(MockGeneration::with_replies([
        MockReply::Ok("## Outline"),
        MockReply::Ok(REQUIRES_CHANGES),
        MockReply::Ok("## Outline revised"),
        MockReply::Ok(APPROVED),
    ]));
    let orchestrator = orchestrator_with(backend.clone());

    let mut session = orchestrator.session("feature stores");

    session.plan().await.unwrap();
    let review = session.review(ReviewTarget::Outline).await.unwrap();
    assert_eq!(review.verdict, ReviewVerdict::RequiresChanges);

    // Caller judgment: fold the feedback in and re-enter the planner
    session.amend_plan_requirements(&review.feedback);
    session.plan().await.unwrap();
    let review = session.review(ReviewTarget::Outline).await.unwrap();
    assert_eq!(review.verdict, ReviewVerdict::Approved);

    assert_eq!(session.outline(), Some("## Outline revised"));
    assert_eq!(backend.calls(), 4);
}

#[tokio::test]
async fn test_profile_personalizes_every_stage_directive() {
    let backend = Arc::new(MockGeneration::with_replies([
        MockReply::Ok("## Outline"),
        MockReply::Ok(APPROVED),
        MockReply::Ok("## Script"),
        MockReply::Ok(APPROVED),
        MockReply::Ok("## Production Script"),
        MockReply::Ok(APPROVED),
    ]));

    let generation: Arc<dyn GenerationBackend> = backend.clone();
    let profile = ChannelProfile {
        channel_name: "ML Ops Navigator".to_string(),
        creator_name: "Grigory".to_string(),
        ..Default::default()
    };
    let orchestrator = Orchestrator::new(
        generation,
        None,
        profile,
        OrchestratorSettings::default(),
    );

    orchestrator.run(&RunRequest::new("topic")).await.unwrap();

    for directive in backend.directives() {
        assert!(directive.contains("- **Channel Name**: ML Ops Navigator"));
        assert!(directive.contains("## INTEGRATION REQUIREMENTS"));
    }
}
