// src/llm/gemini.rs
// Gemini REST backend for the ModelProvider seam

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::debug;

use super::ModelProvider;
use crate::config::UploaderConfig;
use crate::error::{ProviderError, ProviderResult};

const GENERATION_TEMPERATURE: f64 = 0.1;
const MAX_OUTPUT_TOKENS: u32 = 1000;

/// Client for the Gemini `generateContent` API.
///
/// One prompt in, one text reply out. The workflow never retries a model
/// call; a failed call is the stage fallback's problem.
pub struct GeminiClient {
    client: HttpClient,
    api_key: String,
    generate_url: String,
}

impl GeminiClient {
    pub fn new(config: &UploaderConfig) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(config.model_timeout())
            .build()
            .context("failed to build Gemini HTTP client")?;

        Ok(Self {
            client,
            api_key: config.gemini_api_key.trim().to_string(),
            generate_url: config.gemini_generate_url(),
        })
    }
}

#[async_trait]
impl ModelProvider for GeminiClient {
    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        if !self.is_available() {
            return Err(ProviderError::NotConfigured);
        }

        let body = serde_json::json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }],
            "generationConfig": {
                "temperature": GENERATION_TEMPERATURE,
                "maxOutputTokens": MAX_OUTPUT_TOKENS
            }
        });

        let response = self.client.post(&self.generate_url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let json: Value = response.json().await?;

        let text = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| ProviderError::Malformed("no text in Gemini response".into()))?;

        if text.trim().is_empty() {
            return Err(ProviderError::Malformed("empty Gemini response".into()));
        }

        debug!("Gemini reply: {} chars", text.len());
        Ok(text.to_string())
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
