// ABOUTME: Google Gemini recipe provider using the generateContent endpoint
// ABOUTME: Sends the prompt pair as system_instruction plus user content
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! # Gemini Provider
//!
//! [`RecipeProvider`] implementation against Google's Generative AI API.
//! Single-shot `generateContent` call per invocation: the system prompt
//! travels in the separate `system_instruction` field, the user prompt as
//! the sole content turn, and the reply text is extracted from
//! `candidates[0].content.parts[0].text`.
//!
//! ## Configuration
//!
//! Set `GEMINI_API_KEY` with your API key from Google AI Studio.
//! `GEMINI_API_BASE` overrides the endpoint; `GEMINI_MODEL` overrides the
//! model.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use ladle_core::errors::GenerateError;
use ladle_core::models::{Language, PreferenceProfile};

use super::{body_snippet, RecipePrompt, RecipeProvider};

/// Environment variable for the Gemini API key
const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the API base URL
const GEMINI_API_BASE_ENV: &str = "GEMINI_API_BASE";

/// Environment variable overriding the model
const GEMINI_MODEL_ENV: &str = "GEMINI_MODEL";

/// Default API base URL
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Sampling temperature for recipe generation
const TEMPERATURE: f32 = 0.7;

/// Upper bound on generated tokens
const MAX_OUTPUT_TOKENS: u32 = 4096;

// ============================================================================
// API Request/Response Types
// ============================================================================

/// generateContent request body
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    system_instruction: GeminiContent,
    generation_config: GenerationSettings,
}

/// Content block: an optional role plus text parts
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

/// One text part
#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

/// Sampling settings
#[derive(Debug, Serialize)]
struct GenerationSettings {
    temperature: f32,
    max_output_tokens: u32,
    candidate_count: u32,
}

/// generateContent response body
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiErrorBody>,
}

/// One response candidate
#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

/// Error body returned on non-2xx responses
#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Recipe provider speaking the Gemini generate-content wire format
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl GeminiProvider {
    /// Create a provider with an explicit API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
        }
    }

    /// Create a provider from environment variables.
    ///
    /// Requires `GEMINI_API_KEY`; `GEMINI_API_BASE` and `GEMINI_MODEL`
    /// override their defaults when set.
    ///
    /// # Errors
    ///
    /// Returns an error when `GEMINI_API_KEY` is not set.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var(GEMINI_API_KEY_ENV)
            .map_err(|_| anyhow::anyhow!("{GEMINI_API_KEY_ENV} environment variable not set"))?;

        let mut provider = Self::new(api_key);
        if let Ok(base) = env::var(GEMINI_API_BASE_ENV) {
            provider.api_base = base;
        }
        if let Ok(model) = env::var(GEMINI_MODEL_ENV) {
            provider.model = model;
        }
        Ok(provider)
    }

    /// Override the API base URL (tests point this at a local server)
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Override the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The key travels as a query parameter, not a header
    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        )
    }

    fn build_request(prompt: &RecipePrompt) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts: vec![GeminiPart {
                    text: prompt.user.clone(),
                }],
            }],
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: prompt.system.clone(),
                }],
            },
            generation_config: GenerationSettings {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                candidate_count: 1,
            },
        }
    }

    /// Prefer the structured error message over a raw body snippet
    fn error_detail(body: &str) -> String {
        serde_json::from_str::<GeminiResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| body_snippet(body), |e| body_snippet(&e.message))
    }

    fn extract_text(response: GeminiResponse) -> Option<String> {
        response
            .candidates?
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()
            .map(|part| part.text)
            .filter(|text| !text.trim().is_empty())
    }
}

#[async_trait]
impl RecipeProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, prompt, _profile), fields(model = %self.model, lang = %lang))]
    async fn generate(
        &self,
        prompt: &RecipePrompt,
        _profile: Option<&PreferenceProfile>,
        lang: Language,
    ) -> Result<String, GenerateError> {
        let request = Self::build_request(prompt);

        debug!(user_len = prompt.user.len(), "sending generateContent request");

        let response = self
            .client
            .post(self.build_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerateError::provider(None, format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerateError::provider(None, format!("failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "generateContent request rejected");
            return Err(GenerateError::provider(
                Some(status.as_u16()),
                Self::error_detail(&body),
            ));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            GenerateError::provider(None, format!("unexpected response shape: {e}"))
        })?;

        let content = Self::extract_text(parsed)
            .ok_or_else(|| GenerateError::provider(None, "response contained no candidate text"))?;

        debug!(content_len = content.len(), "received generateContent reply");
        Ok(content)
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::build_recipe_prompt;

    #[test]
    fn test_request_splits_system_and_user_prompts() {
        let prompt = build_recipe_prompt("ramen", None, Language::En);
        let request = GeminiProvider::build_request(&prompt);

        assert!(request.system_instruction.parts[0].text.contains("JSON"));
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].role.as_deref(), Some("user"));
        assert!(request.contents[0].parts[0].text.contains("ramen"));
    }

    #[test]
    fn test_extract_text_requires_nonempty_part() {
        let empty = GeminiResponse {
            candidates: Some(vec![GeminiCandidate {
                content: Some(GeminiContent {
                    role: None,
                    parts: vec![GeminiPart { text: "  ".into() }],
                }),
            }]),
            error: None,
        };
        assert!(GeminiProvider::extract_text(empty).is_none());

        let missing = GeminiResponse {
            candidates: None,
            error: None,
        };
        assert!(GeminiProvider::extract_text(missing).is_none());
    }

    #[test]
    fn test_error_detail_prefers_structured_message() {
        let body = r#"{"error": {"message": "API key not valid"}}"#;
        assert_eq!(GeminiProvider::error_detail(body), "API key not valid");
        assert_eq!(GeminiProvider::error_detail("plain text"), "plain text");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let provider = GeminiProvider::new("aiza-secret");
        let debug = format!("{provider:?}");
        assert!(!debug.contains("aiza-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
