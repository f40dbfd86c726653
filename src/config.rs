//! Configuration for showrunner.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (SHOWRUNNER_HOME, SHOWRUNNER_MODEL,
//!    SHOWRUNNER_SEARCH_ENDPOINT)
//! 2. Config file (.showrunner/config.yaml)
//! 3. Defaults (~/.showrunner)
//!
//! Config file discovery:
//! - Searches current directory and parents for .showrunner/config.yaml

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub model: Option<String>,
    pub paths: PathsConfig,
    pub generation: Option<GenerationConfig>,
    pub search: Option<SearchConfig>,
    pub pipeline: Option<PipelineConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// State directory holding the channel profile (relative to config file)
    pub home: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub binary: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: Option<String>,
    pub max_queries: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub max_research_iterations: Option<u32>,
    pub max_revision_cycles: Option<u32>,
}

/// Resolved configuration with absolute paths and defaults filled in
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to the showrunner state directory
    pub home: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Model passed to the generation backend
    pub model: String,
    pub generation: GenerationSettings,
    pub search: SearchSettings,
    pub pipeline: PipelineSettings,
}

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// Generation CLI binary name or path
    pub binary: String,
    /// Per-call timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            binary: "llm".to_string(),
            timeout_seconds: 300,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// SearxNG-compatible endpoint; search is disabled when absent
    pub endpoint: Option<String>,
    /// Maximum search queries per research session
    pub max_queries: usize,
    /// Per-query timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            max_queries: 6,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Retry bound for the research stage (1 = single best-effort attempt)
    pub max_research_iterations: u32,
    /// Default budget for feedback-driven revision cycles in automatic runs
    pub max_revision_cycles: u32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_research_iterations: 1,
            max_revision_cycles: 2,
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".showrunner").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".showrunner");

    let config_file = find_config_file();

    let file = match config_file {
        Some(ref path) => load_config_file(path)?,
        None => ConfigFile::default(),
    };

    // Resolve home path
    let home = if let Ok(env_home) = std::env::var("SHOWRUNNER_HOME") {
        PathBuf::from(env_home)
    } else if let (Some(config_path), Some(home_path)) = (&config_file, &file.paths.home) {
        let config_dir = config_path.parent().unwrap_or(Path::new("."));
        resolve_path(config_dir, home_path)
    } else {
        default_home
    };

    // Model: env > file > default
    let model = std::env::var("SHOWRUNNER_MODEL")
        .ok()
        .or(file.model)
        .unwrap_or_else(default_model);

    let generation = {
        let defaults = GenerationSettings::default();
        let section = file.generation.unwrap_or_default();
        GenerationSettings {
            binary: section.binary.unwrap_or(defaults.binary),
            timeout_seconds: section.timeout_seconds.unwrap_or(defaults.timeout_seconds),
        }
    };

    let search = {
        let defaults = SearchSettings::default();
        let section = file.search.unwrap_or_default();
        SearchSettings {
            endpoint: std::env::var("SHOWRUNNER_SEARCH_ENDPOINT")
                .ok()
                .or(section.endpoint),
            max_queries: section.max_queries.unwrap_or(defaults.max_queries),
            timeout_seconds: section.timeout_seconds.unwrap_or(defaults.timeout_seconds),
        }
    };

    let pipeline = {
        let defaults = PipelineSettings::default();
        let section = file.pipeline.unwrap_or_default();
        PipelineSettings {
            max_research_iterations: section
                .max_research_iterations
                .unwrap_or(defaults.max_research_iterations)
                .max(1),
            max_revision_cycles: section
                .max_revision_cycles
                .unwrap_or(defaults.max_revision_cycles),
        }
    };

    Ok(ResolvedConfig {
        home,
        config_file,
        model,
        generation,
        search,
        pipeline,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Path to the stored channel profile ($SHOWRUNNER_HOME/channel.yaml)
pub fn profile_path() -> Result<PathBuf> {
    Ok(config()?.home.join("channel.yaml"))
}
