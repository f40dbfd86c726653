//! Shared test fixtures.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use showrunner::adapters::{GenerationBackend, GenerationOutput};

/// One scripted backend reply
pub enum MockReply {
    Ok(&'static str),
    Err(&'static str),
}

/// Scripted generation backend: pops queued replies in order, then falls
/// back to a fixed reply. Records every call and its directive.
pub struct MockGeneration {
    replies: Mutex<VecDeque<MockReply>>,
    fallback: String,
    calls: AtomicUsize,
    directives: Mutex<Vec<String>>,
}

impl MockGeneration {
    pub fn with_replies(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            fallback: "fallback output".to_string(),
            calls: AtomicUsize::new(0),
            directives: Mutex::new(Vec::new()),
        }
    }

    /// A backend that always returns the same reply
    pub fn always(reply: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: reply.into(),
            calls: AtomicUsize::new(0),
            directives: Mutex::new(Vec::new()),
        }
    }

    /// Number of generation calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Directives seen, in call order
    pub fn directives(&self) -> Vec<String> {
        self.directives.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for MockGeneration {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        directive: &str,
        _inputs: &[(String, String)],
        _timeout: Duration,
    ) -> Result<GenerationOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.directives.lock().unwrap().push(directive.to_string());

        match self.replies.lock().unwrap().pop_front() {
            Some(MockReply::Ok(content)) => Ok(GenerationOutput::new(content.to_string())),
            Some(MockReply::Err(message)) => anyhow::bail!("{message}"),
            None => Ok(GenerationOutput::new(self.fallback.clone())),
        }
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
