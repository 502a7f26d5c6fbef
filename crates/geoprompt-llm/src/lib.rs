//! GeoPrompt LLM - Text generation port
//!
//! This crate defines the port the intent resolver uses to reach a reasoning
//! service, along with the Ollama adapter and a scripted generator for tests
//! and offline demos.

pub mod ollama;
pub mod ports;
pub mod scripted;

// Re-export main types
pub use ollama::OllamaGenerator;
pub use ports::Generator;
pub use scripted::ScriptedGenerator;
