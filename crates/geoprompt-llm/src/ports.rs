//! LLM port definitions

use async_trait::async_trait;
use geoprompt_core::error::Result;

/// Port for text generation
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for `prompt`
    ///
    /// # Returns
    /// The raw completion text, which may wrap the requested JSON in prose
    /// or code fences
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the name/identifier of the generation model
    fn model_name(&self) -> &str;
}
