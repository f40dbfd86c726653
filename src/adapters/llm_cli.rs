//! Generation backend calling an `llm`-style CLI as a subprocess.
//!
//! The stage directive is passed as the system prompt (`-s`) and the named
//! context inputs are rendered as markdown sections piped to stdin.

use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use super::{GenerationBackend, GenerationOutput};

/// Generation backend using subprocess mode
pub struct LlmCliBackend {
    /// Path to the CLI binary (default: "llm")
    binary_path: String,

    /// Model identifier passed via `-m`
    model: String,
}

impl LlmCliBackend {
    /// Create a backend for a model using the default binary path
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            binary_path: "llm".to_string(),
            model: model.into(),
        }
    }

    /// Create a backend with a custom binary path
    pub fn with_binary_path(binary_path: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            binary_path: binary_path.into(),
            model: model.into(),
        }
    }

    /// Create a backend from the resolved configuration
    pub fn from_config(config: &crate::config::ResolvedConfig) -> Self {
        Self::with_binary_path(config.generation.binary.as_str(), config.model.as_str())
    }

    /// Render named inputs as markdown sections for the prompt
    fn render_inputs(inputs: &[(String, String)]) -> String {
        inputs
            .iter()
            .map(|(key, value)| format!("## {key}\n\n{value}"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Execute one generation call via subprocess
    async fn execute_subprocess(
        &self,
        directive: &str,
        prompt: &str,
        call_timeout: Duration,
    ) -> Result<String> {
        let mut child = Command::new(&self.binary_path)
            .args(["-m", &self.model, "-s", directive])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to spawn generation process '{}' for model '{}'",
                    self.binary_path, self.model
                )
            })?;

        // Write the prompt to stdin; dropping stdin signals EOF
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(prompt.as_bytes())
                .await
                .context("Failed to write prompt to generation stdin")?;
        }

        let output = timeout(call_timeout, child.wait_with_output())
            .await
            .with_context(|| {
                format!(
                    "Generation call for model '{}' timed out after {:?}",
                    self.model, call_timeout
                )
            })?
            .context("Failed to wait for generation process")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            anyhow::bail!(
                "Generation call for model '{}' failed with exit code {}: {}",
                self.model,
                exit_code,
                stderr.trim()
            );
        }

        let stdout =
            String::from_utf8(output.stdout).context("Generation output is not valid UTF-8")?;

        Ok(stdout)
    }
}

#[async_trait]
impl GenerationBackend for LlmCliBackend {
    fn name(&self) -> &str {
        "llm-cli"
    }

    async fn generate(
        &self,
        directive: &str,
        inputs: &[(String, String)],
        timeout: Duration,
    ) -> Result<GenerationOutput> {
        let prompt = Self::render_inputs(inputs);
        let content = self
            .execute_subprocess(directive, &prompt, timeout)
            .await?;
        Ok(GenerationOutput::new(content))
    }

    async fn health_check(&self) -> Result<()> {
        let output = Command::new(&self.binary_path)
            .arg("--version")
            .output()
            .await
            .context("Failed to run generation backend health check")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Generation backend health check failed: {}", stderr);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_creation() {
        let backend = LlmCliBackend::new("gemini-2.5-flash");
        assert_eq!(backend.name(), "llm-cli");
        assert_eq!(backend.binary_path, "llm");
    }

    #[test]
    fn test_custom_binary_path() {
        let backend = LlmCliBackend::with_binary_path("/custom/path/llm", "gemini-2.5-flash");
        assert_eq!(backend.binary_path, "/custom/path/llm");
    }

    #[test]
    fn test_render_inputs_as_sections() {
        let inputs = vec![
            ("research_topic".to_string(), "feature stores".to_string()),
            ("script_outline".to_string(), "## Outline".to_string()),
        ];

        let rendered = LlmCliBackend::render_inputs(&inputs);
        assert_eq!(
            rendered,
            "## research_topic\n\nfeature stores\n\n## script_outline\n\n## Outline"
        );
    }

    // Note: integration tests with a real CLI would go in tests/
}
