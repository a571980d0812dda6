// ABOUTME: OpenAI chat-completions recipe provider
// ABOUTME: Sends the prompt pair as system/user messages and extracts the reply text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! # OpenAI Provider
//!
//! [`RecipeProvider`] implementation against the OpenAI chat-completions
//! API. One HTTP POST per `generate` call; retry policy lives in the
//! orchestrator, never here.
//!
//! ## Configuration
//!
//! Set `OPENAI_API_KEY` with your API key. `OPENAI_API_BASE` overrides the
//! endpoint (tests and compatible gateways); `OPENAI_MODEL` overrides the
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

/// Environment variable for the OpenAI API key
const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the API base URL
const OPENAI_API_BASE_ENV: &str = "OPENAI_API_BASE";

/// Environment variable overriding the model
const OPENAI_MODEL_ENV: &str = "OPENAI_MODEL";

/// Default API base URL
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default model
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature for recipe generation
const TEMPERATURE: f32 = 0.7;

/// Upper bound on generated tokens, comfortably above the largest valid recipe
const MAX_TOKENS: u32 = 4096;

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    temperature: f32,
    max_tokens: u32,
}

/// One chat message
#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: &'static str,
    content: String,
}

/// Chat-completions response body
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

/// One response choice
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

/// Message inside a response choice
#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Recipe provider speaking the OpenAI chat-completions wire format
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl OpenAiProvider {
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
    /// Requires `OPENAI_API_KEY`; `OPENAI_API_BASE` and `OPENAI_MODEL`
    /// override their defaults when set.
    ///
    /// # Errors
    ///
    /// Returns an error when `OPENAI_API_KEY` is not set.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var(OPENAI_API_KEY_ENV)
            .map_err(|_| anyhow::anyhow!("{OPENAI_API_KEY_ENV} environment variable not set"))?;

        let mut provider = Self::new(api_key);
        if let Ok(base) = env::var(OPENAI_API_BASE_ENV) {
            provider.api_base = base;
        }
        if let Ok(model) = env::var(OPENAI_MODEL_ENV) {
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

    fn build_request(&self, prompt: &RecipePrompt) -> OpenAiRequest {
        OpenAiRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAiMessage {
                    role: "system",
                    content: prompt.system.clone(),
                },
                OpenAiMessage {
                    role: "user",
                    content: prompt.user.clone(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[async_trait]
impl RecipeProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    #[instrument(skip(self, prompt, _profile), fields(model = %self.model, lang = %lang))]
    async fn generate(
        &self,
        prompt: &RecipePrompt,
        _profile: Option<&PreferenceProfile>,
        lang: Language,
    ) -> Result<String, GenerateError> {
        let request = self.build_request(prompt);

        debug!(user_len = prompt.user.len(), "sending chat completion request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .header("Authorization", format!("Bearer {}", self.api_key))
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
            error!(status = %status, "chat completion request rejected");
            return Err(GenerateError::provider(
                Some(status.as_u16()),
                body_snippet(&body),
            ));
        }

        let parsed: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            GenerateError::provider(None, format!("unexpected response shape: {e}"))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| GenerateError::provider(None, "response contained no message content"))?;

        debug!(content_len = content.len(), "received chat completion");
        Ok(content)
    }
}

impl Debug for OpenAiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OpenAiProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
