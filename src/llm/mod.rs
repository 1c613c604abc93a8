// src/llm/mod.rs
// Generative model seam: one trait, one Gemini implementation, and the
// helpers that scrape labeled fields out of free-text replies.

pub mod gemini;
pub mod parse;

pub use gemini::GeminiClient;

use crate::error::ProviderResult;
use async_trait::async_trait;

/// Unified seam for generative model backends.
///
/// The workflow treats every reply as untrusted free text; there is no
/// structured output contract beyond what `parse` can recover.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Whether the backing model is configured and callable
    fn is_available(&self) -> bool;

    /// Send one prompt and return the raw text reply
    async fn generate(&self, prompt: &str) -> ProviderResult<String>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
