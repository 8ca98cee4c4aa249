//! Generative text collaborator
//!
//! - `TextGenerator`: the prompt-in, text-out contract
//! - `GeminiClient`: `generateContent` backend with transient-failure retries
//! - `prompts`: templates for transport lookups and trip plans

pub mod gemini;
pub mod prompts;

use async_trait::async_trait;

use crate::Result;

pub use gemini::GeminiClient;

/// Produces free-form text for a prompt. Output is untrusted and usually needs extraction.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
