//! Generator that replays canned completions

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use geoprompt_core::error::{GeopromptError, Result};

use crate::ports::Generator;

/// Generator with a fixed reply, for offline demos and tests
#[derive(Debug)]
pub struct ScriptedGenerator {
    reply: std::result::Result<String, String>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    /// Always answer with `text`
    pub fn replying(text: impl Into<String>) -> Self {
        Self { reply: Ok(text.into()), calls: AtomicUsize::new(0) }
    }

    /// Always fail as an unreachable service would
    pub fn failing(reason: impl Into<String>) -> Self {
        Self { reply: Err(reason.into()), calls: AtomicUsize::new(0) }
    }

    /// Number of prompts received so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(reason) => Err(GeopromptError::GeneratorUnavailable {
                reason: reason.clone(),
                remediation: "Scripted generator configured to fail".to_string(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replying_counts_calls() {
        let generator = ScriptedGenerator::replying("{}");
        assert_eq!(generator.generate("a").await.unwrap(), "{}");
        assert_eq!(generator.generate("b").await.unwrap(), "{}");
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_failing() {
        let generator = ScriptedGenerator::failing("offline");
        let err = generator.generate("a").await.unwrap_err();
        assert!(err.to_string().contains("offline"));
    }
}
