//! Command-line interface for showrunner.
//!
//! Provides commands for producing scripts, managing the channel profile,
//! and inspecting the resolved configuration.

use std::io::{self, BufRead, Write as IoWrite};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::{GenerationBackend, HttpSearchBackend, LlmCliBackend, SearchBackend};
use crate::channel::{ChannelProfile, ProfileStore, ProfileUpdate};
use crate::config;
use crate::core::{Orchestrator, OrchestratorSettings, ReviewTarget, RunRequest};
use crate::domain::{keys, RetryOutcome, RunReport};

/// showrunner - channel-aware agent pipeline for YouTube script production
#[derive(Parser, Debug)]
#[command(name = "showrunner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Produce a script for a topic
    Run {
        /// Video topic
        topic: String,

        /// Run the research stage before planning
        #[arg(long)]
        research: bool,

        /// Extra outline requirements for the planner
        #[arg(long)]
        requirements: Option<String>,

        /// Review and revise the outline interactively before writing
        #[arg(long)]
        edit_outline: bool,

        /// Budget for feedback-driven revision cycles per phase
        /// (defaults to the configured value)
        #[arg(long)]
        max_revisions: Option<u32>,

        /// Model to use (overrides configuration)
        #[arg(long)]
        model: Option<String>,

        /// Directory to export all artifacts into as markdown files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the full run report as JSON instead of the script
        #[arg(long)]
        json: bool,
    },

    /// Manage the channel profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Show resolved configuration (debug)
    Config,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Print the current channel profile
    Show,

    /// Configure the channel profile interactively
    Setup,

    /// Set profile fields programmatically (key=value pairs;
    /// expertise_areas is comma-separated)
    Set {
        /// Field assignments, e.g. channel_name="My Channel"
        values: Vec<String>,
    },

    /// Reset the channel profile to defaults
    Reset,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Run {
                topic,
                research,
                requirements,
                edit_outline,
                max_revisions,
                model,
                output,
                json,
            } => {
                run_script(
                    &topic,
                    research,
                    requirements,
                    edit_outline,
                    max_revisions,
                    model,
                    output,
                    json,
                )
                .await
            }
            Commands::Profile { command } => match command {
                ProfileCommands::Show => profile_show(),
                ProfileCommands::Setup => profile_setup(),
                ProfileCommands::Set { values } => profile_set(&values),
                ProfileCommands::Reset => profile_reset(),
            },
            Commands::Config => show_config(),
        }
    }
}

/// Produce a script for a topic
#[allow(clippy::too_many_arguments)]
async fn run_script(
    topic: &str,
    research: bool,
    requirements: Option<String>,
    edit_outline: bool,
    max_revisions: Option<u32>,
    model: Option<String>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let cfg = config::config()?;

    let model = model.unwrap_or_else(|| cfg.model.clone());
    let generation: Arc<dyn GenerationBackend> = Arc::new(LlmCliBackend::with_binary_path(
        cfg.generation.binary.as_str(),
        model,
    ));
    let search: Option<Arc<dyn SearchBackend>> =
        HttpSearchBackend::from_config(cfg)?.map(|s| Arc::new(s) as Arc<dyn SearchBackend>);

    let profile = ProfileStore::open_default()?.load()?;
    if profile.is_empty() {
        eprintln!("No channel profile configured; scripts will not be personalized.");
        eprintln!("Run 'showrunner profile setup' to configure your channel.\n");
    }

    let orchestrator = Orchestrator::new(
        generation,
        search,
        profile,
        OrchestratorSettings::from_config(cfg),
    );
    let max_revisions = max_revisions.unwrap_or(cfg.pipeline.max_revision_cycles);

    let report = if edit_outline {
        run_interactive(&orchestrator, topic, research, requirements, max_revisions).await?
    } else {
        let mut request = RunRequest::new(topic)
            .with_research(research)
            .with_max_revision_cycles(max_revisions);
        if let Some(req) = requirements {
            request = request.with_outline_requirements(req);
        }
        orchestrator.run(&request).await?
    };

    if let Some(ref dir) = output {
        export_artifacts(&report, dir)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let Some(script) = report.production_script() {
        println!("{}", script);
    }

    print_summary(&report);
    Ok(())
}

/// Drive one session with user-mediated outline revision
async fn run_interactive(
    orchestrator: &Orchestrator,
    topic: &str,
    research: bool,
    requirements: Option<String>,
    max_revisions: u32,
) -> Result<RunReport> {
    let mut session = orchestrator.session(topic);

    if research {
        eprintln!("🔍 Researching topic...");
        if session.research().await? == RetryOutcome::Exhausted {
            eprintln!("   (research exhausted its bound; continuing best-effort)");
        }
    }

    if let Some(ref req) = requirements {
        session.amend_plan_requirements(req);
    }

    // Outline phase: the user decides whether to fold feedback back in
    loop {
        eprintln!("📝 Planning outline...");
        if let RetryOutcome::Escalated { message } = session.plan().await? {
            anyhow::bail!("{message}");
        }

        let review = session.review(ReviewTarget::Outline).await?;
        if review.verdict.is_approved() {
            break;
        }

        eprintln!("\nEditor feedback:\n{}\n", review.feedback);
        let answer = prompt("Revise the outline with this feedback? [Y/n]: ")?;
        if answer.eq_ignore_ascii_case("n") || answer.eq_ignore_ascii_case("no") {
            break;
        }
        session.amend_plan_requirements(&review.feedback);
    }

    if let Some(outline) = session.outline() {
        eprintln!("\n═══ OUTLINE ═══\n{}\n", outline);
    }
    let extra = prompt("Additional outline requirements (blank to continue): ")?;
    if !extra.is_empty() {
        session.amend_plan_requirements(&extra);
        if let RetryOutcome::Escalated { message } = session.plan().await? {
            anyhow::bail!("{message}");
        }
        session.review(ReviewTarget::Outline).await?;
    }

    // Write phase
    let mut cycles = 0;
    loop {
        eprintln!("✍️  Writing script...");
        session.write().await?;

        let review = session.review(ReviewTarget::Script).await?;
        if review.verdict.is_approved() || cycles >= max_revisions {
            break;
        }
        cycles += 1;
        session.amend_write_requirements(&review.feedback);
    }

    // Direct phase
    let mut cycles = 0;
    loop {
        eprintln!("🎬 Directing production script...");
        session.direct().await?;

        let review = session.review(ReviewTarget::Production).await?;
        if review.verdict.is_approved() || cycles >= max_revisions {
            break;
        }
        cycles += 1;
        session.amend_direct_requirements(&review.feedback);
    }

    Ok(session.into_report())
}

/// Write every present artifact into a directory as markdown
fn export_artifacts(report: &RunReport, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let artifact_keys = [
        keys::RESEARCH_FINDINGS,
        keys::SCRIPT_OUTLINE,
        keys::SCRIPT,
        keys::PRODUCTION_SCRIPT,
        keys::VALIDATION_RESULT,
    ];

    for key in artifact_keys {
        if let Some(content) = report.context.content(key) {
            let path = dir.join(format!("{key}.md"));
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write artifact: {}", path.display()))?;
        }
    }

    eprintln!("📁 Artifacts written to {}", dir.display());
    Ok(())
}

/// Print a run summary to stderr
fn print_summary(report: &RunReport) {
    eprintln!("\n[Run {}]", report.id);
    for record in &report.stages {
        let outcome = match &record.outcome {
            RetryOutcome::Completed => "completed".to_string(),
            RetryOutcome::Exhausted => "exhausted (best-effort)".to_string(),
            RetryOutcome::Escalated { message } => format!("escalated: {message}"),
        };
        eprintln!("  {:<28} {}", record.stage, outcome);
    }
    for review in &report.reviews {
        eprintln!("  review {:<21} {:?}", review.target, review.verdict);
    }
    if report.approved() {
        eprintln!("✅ All deliverables approved");
    } else {
        eprintln!("⚠️  Finished with unapproved deliverables");
    }
}

/// Print the current channel profile
fn profile_show() -> Result<()> {
    let store = ProfileStore::open_default()?;
    let profile = store.load()?;

    if profile.is_empty() {
        println!("No channel profile configured.");
        println!("Run 'showrunner profile setup' to configure your channel.");
        return Ok(());
    }

    println!("📋 CURRENT CHANNEL CONFIGURATION");
    println!("{}", "=".repeat(40));
    if !profile.channel_name.is_empty() {
        println!("📺 Channel: {}", profile.channel_name);
    }
    if !profile.creator_name.is_empty() {
        println!("👤 Creator: {}", profile.creator_name);
    }
    if !profile.target_audience.is_empty() {
        println!("🎯 Audience: {}", profile.target_audience);
    }
    if !profile.content_style.is_empty() {
        println!("🎨 Style: {}", profile.content_style);
    }
    if !profile.tone_of_voice.is_empty() {
        println!("🗣  Tone: {}", profile.tone_of_voice);
    }
    if !profile.expertise_areas.is_empty() {
        println!("🧠 Expertise: {}", profile.expertise_areas.join(", "));
    }
    if !profile.unique_value_proposition.is_empty() {
        println!("⭐ Unique value: {}", profile.unique_value_proposition);
    }
    if !profile.preferred_video_length.is_empty() {
        println!("⏱  Video length: {}", profile.preferred_video_length);
    }

    println!("\nStored at: {}", store.path().display());
    Ok(())
}

/// Interactive channel setup
fn profile_setup() -> Result<()> {
    println!("🎬 showrunner - Channel Setup");
    println!("{}", "=".repeat(50));
    println!("Let's configure your channel information for personalized script generation.\n");

    println!("📺 BASIC CHANNEL INFORMATION");
    let channel_name = prompt("Channel Name: ")?;
    let creator_name = prompt("Your Name (Creator): ")?;
    let channel_description = prompt("Channel Description (brief): ")?;
    let target_audience =
        prompt("Target Audience (e.g. 'data engineers', 'security professionals'): ")?;

    println!("\n🎨 CONTENT PREFERENCES");
    println!("Content Style options: educational, entertaining, professional, casual, ...");
    let content_style = prompt("Content Style: ")?;
    println!("Tone of Voice options: friendly, authoritative, conversational, technical, ...");
    let tone_of_voice = prompt("Tone of Voice: ")?;
    let expertise_input =
        prompt("Areas of Expertise (comma-separated, e.g. 'mlops, data engineering'): ")?;

    println!("\n🌟 PERSONAL BRANDING");
    let unique_value_proposition = prompt("What makes your channel unique?: ")?;
    let creator_background = prompt("Your professional background/credentials: ")?;
    let personal_story = prompt("Personal story/connection with audience (optional): ")?;

    println!("\n📋 CONTENT GUIDELINES");
    println!("Video Length options: '5-8 minutes', '10-15 minutes', 'short-form', ...");
    let preferred_video_length = prompt("Preferred Video Length: ")?;
    let call_to_action_style = prompt("How do you typically end videos/ask for engagement?: ")?;
    let engagement_preferences = prompt("How do you prefer to interact with your audience?: ")?;

    println!("\n🎥 TECHNICAL PREFERENCES");
    let visual_style_notes = prompt("Visual style preferences (optional): ")?;
    let production_constraints = prompt("Production constraints (equipment, budget, time): ")?;

    let profile = ChannelProfile {
        channel_name,
        creator_name,
        channel_description,
        target_audience,
        content_style,
        tone_of_voice,
        expertise_areas: expertise_input
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        unique_value_proposition,
        creator_background,
        personal_story,
        preferred_video_length,
        call_to_action_style,
        engagement_preferences,
        visual_style_notes,
        production_constraints,
    };

    let store = ProfileStore::open_default()?;
    store.save(&profile)?;

    println!("\n✅ Channel information configured successfully!");
    profile_show()
}

/// Programmatic profile update from key=value pairs
fn profile_set(values: &[String]) -> Result<()> {
    if values.is_empty() {
        anyhow::bail!(
            "No assignments given. Usage: showrunner profile set channel_name=\"My Channel\" ..."
        );
    }

    let mut update = ProfileUpdate::default();
    for pair in values {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Invalid assignment '{}': expected key=value", pair))?;

        if !update.set_field(key.trim(), value) {
            anyhow::bail!("Unknown profile field '{}'", key.trim());
        }
    }

    let store = ProfileStore::open_default()?;
    store.update(&update)?;

    println!("✅ Channel information updated");
    Ok(())
}

/// Reset the stored profile
fn profile_reset() -> Result<()> {
    let store = ProfileStore::open_default()?;
    store.reset()?;
    println!("🔄 Channel configuration reset to defaults");
    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("showrunner configuration");
    println!("{}", "=".repeat(40));
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:    {}", cfg.home.display());
    println!("  Profile: {}", config::profile_path()?.display());
    println!();
    println!("Generation:");
    println!("  Model:   {}", cfg.model);
    println!("  Binary:  {}", cfg.generation.binary);
    println!("  Timeout: {}s", cfg.generation.timeout_seconds);
    println!();
    println!("Search:");
    println!(
        "  Endpoint:    {}",
        cfg.search.endpoint.as_deref().unwrap_or("(disabled)")
    );
    println!("  Max queries: {}", cfg.search.max_queries);
    println!("  Timeout:     {}s", cfg.search.timeout_seconds);
    println!();
    println!("Pipeline:");
    println!("  Research iterations: {}", cfg.pipeline.max_research_iterations);
    println!("  Revision cycles:     {}", cfg.pipeline.max_revision_cycles);

    Ok(())
}

/// Read one trimmed line from stdin after printing a label
fn prompt(label: &str) -> Result<String> {
    eprint!("{label}");
    io::stderr().flush().ok();

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    Ok(line.trim().to_string())
}
