use std::time::Duration;

use async_trait::async_trait;
use geoprompt_core::error::{GeopromptError, Result};
use serde::{Deserialize, Serialize};

use crate::ports::Generator;

/// Ollama text generator
pub struct OllamaGenerator {
    /// Base URL for Ollama API (e.g., "http://localhost:11434")
    base_url: String,

    /// Model name to use for generation
    model: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OllamaGenerator {
    /// Create a new Ollama generator with a request timeout
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let model = model.into();
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            GeopromptError::GeneratorUnavailable {
                reason: format!("Failed to build HTTP client: {}", e),
                remediation: "Check the TLS configuration of this machine".to_string(),
            }
        })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model,
            client,
        })
    }

    /// Create with default localhost URL
    pub fn localhost(model: impl Into<String>) -> Result<Self> {
        Self::new("http://localhost:11434", model, Duration::from_secs(30))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "calling Ollama generate");

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| GeopromptError::GeneratorUnavailable {
                reason: format!("Failed to connect to Ollama: {}", e),
                remediation: format!(
                    "Ensure Ollama is running at {} and the model '{}' is available. \
                     Run 'ollama pull {}' to download the model.",
                    self.base_url, self.model, self.model
                ),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeopromptError::GeneratorUnavailable {
                reason: format!("Ollama API error ({}): {}", status, error_text),
                remediation: format!(
                    "Check that the model '{}' is available. Run 'ollama list' to see installed models.",
                    self.model
                ),
            });
        }

        let generated: OllamaGenerateResponse =
            response.json().await.map_err(|e| GeopromptError::GeneratorUnavailable {
                reason: format!("Failed to parse Ollama response: {}", e),
                remediation: "Check Ollama API compatibility".to_string(),
            })?;

        Ok(generated.response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Request body for Ollama generate API
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response from Ollama generate API
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_generator_creation() {
        let generator = OllamaGenerator::localhost("llama3.1").unwrap();
        assert_eq!(generator.model_name(), "llama3.1");
        assert_eq!(generator.base_url(), "http://localhost:11434");
    }

    #[test]
    fn test_ollama_generator_custom_url() {
        let generator =
            OllamaGenerator::new("http://custom:11434/", "test-model", Duration::from_secs(5)).unwrap();
        assert_eq!(generator.base_url, "http://custom:11434");
        assert_eq!(generator.model_name(), "test-model");
    }

    #[test]
    fn test_request_body_disables_streaming() {
        let request = OllamaGenerateRequest { model: "m", prompt: "p", stream: false };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({ "model": "m", "prompt": "p", "stream": false }));
    }

    #[tokio::test]
    async fn test_unreachable_service_reports_remediation() {
        let generator =
            OllamaGenerator::new("http://127.0.0.1:9", "llama3.1", Duration::from_secs(2)).unwrap();

        match generator.generate("hello").await {
            Err(GeopromptError::GeneratorUnavailable { remediation, .. }) => {
                assert!(remediation.contains("ollama pull llama3.1"));
            }
            other => panic!("Expected GeneratorUnavailable, got {:?}", other),
        }
    }
}
