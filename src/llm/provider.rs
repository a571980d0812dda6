// ABOUTME: Configuration-selected wrapper over the recipe provider adapters
// ABOUTME: Abstracts over OpenAI, Gemini, and the offline mock behind one enum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! # Recipe Backend Selector
//!
//! One enum wrapping the three adapters so callers pick a backend once, at
//! construction time, from [`GenerationConfig`]. No runtime type inspection
//! is needed afterwards: the enum implements [`RecipeProvider`] by plain
//! delegation.
//!
//! ## Configuration
//!
//! Set `LADLE_AI_PROVIDER`:
//! - `mock` (default): offline deterministic provider, no credentials
//! - `openai`: chat-completions adapter (requires `OPENAI_API_KEY`)
//! - `gemini`: generate-content adapter (requires `GEMINI_API_KEY`)

use async_trait::async_trait;
use tracing::info;

use ladle_core::errors::GenerateError;
use ladle_core::models::{Language, PreferenceProfile};

use crate::config::{GenerationConfig, ProviderKind};

use super::{GeminiProvider, MockRecipeProvider, OpenAiProvider, RecipePrompt, RecipeProvider};

/// Unified recipe backend wrapping the configured adapter
#[derive(Debug)]
pub enum RecipeBackend {
    /// OpenAI chat-completions adapter
    OpenAi(OpenAiProvider),
    /// Google Gemini generate-content adapter
    Gemini(GeminiProvider),
    /// Offline deterministic mock
    Mock(MockRecipeProvider),
}

impl RecipeBackend {
    /// Construct the backend named by the configuration.
    ///
    /// Network adapters read their credentials from the environment here,
    /// at construction, so a missing key fails fast instead of on the
    /// first generation call.
    ///
    /// # Errors
    ///
    /// Returns an error when the selected network backend's API key
    /// environment variable is not set.
    pub fn from_config(config: &GenerationConfig) -> anyhow::Result<Self> {
        let backend = match config.provider {
            ProviderKind::OpenAi => Self::OpenAi(OpenAiProvider::from_env()?),
            ProviderKind::Gemini => Self::Gemini(GeminiProvider::from_env()?),
            ProviderKind::Mock => Self::Mock(MockRecipeProvider::new(config.mock_delay)),
        };

        info!(
            provider = backend.name(),
            "recipe backend initialized (set {} to change)",
            ProviderKind::ENV_VAR
        );
        Ok(backend)
    }
}

#[async_trait]
impl RecipeProvider for RecipeBackend {
    fn name(&self) -> &'static str {
        match self {
            Self::OpenAi(p) => p.name(),
            Self::Gemini(p) => p.name(),
            Self::Mock(p) => p.name(),
        }
    }

    async fn generate(
        &self,
        prompt: &RecipePrompt,
        profile: Option<&PreferenceProfile>,
        lang: Language,
    ) -> Result<String, GenerateError> {
        match self {
            Self::OpenAi(p) => p.generate(prompt, profile, lang).await,
            Self::Gemini(p) => p.generate(prompt, profile, lang).await,
            Self::Mock(p) => p.generate(prompt, profile, lang).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_backend_needs_no_credentials() {
        let config = GenerationConfig::default().with_provider(ProviderKind::Mock);
        let backend = RecipeBackend::from_config(&config).unwrap();
        assert_eq!(backend.name(), "mock");
    }
}
