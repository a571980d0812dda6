// ABOUTME: AI provider abstraction layer for recipe generation
// ABOUTME: Defines the RecipeProvider contract and re-exports the adapters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! # Recipe Provider Interface
//!
//! This module defines the contract recipe providers implement: two network
//! adapters (OpenAI chat-completions and Gemini generate-content) plus an
//! offline mock, all returning raw response text that the shared parser
//! turns into a validated [`Recipe`](ladle_core::models::Recipe).
//!
//! ## Key Concepts
//!
//! - **`RecipeProvider`**: async trait producing raw response text
//! - **`RecipePrompt`**: system and user prompt pair from the prompt builder
//! - **`RecipeBackend`**: configuration-selected wrapper over the adapters
//!
//! ## Example: Using a Provider
//!
//! ```rust,no_run
//! use ladle::llm::{build_recipe_prompt, RecipeProvider};
//! use ladle_core::models::Language;
//!
//! async fn example(provider: &dyn RecipeProvider) {
//!     let prompt = build_recipe_prompt("quick vegan pasta", None, Language::En);
//!     let raw = provider.generate(&prompt, None, Language::En).await;
//! }
//! ```

mod gemini;
mod mock;
mod openai;
mod parser;
mod prompts;
mod provider;

pub use gemini::GeminiProvider;
pub use mock::MockRecipeProvider;
pub use openai::OpenAiProvider;
pub use parser::parse_recipe_response;
pub use prompts::{build_recipe_prompt, RecipePrompt};
pub use provider::RecipeBackend;

use async_trait::async_trait;

use ladle_core::errors::GenerateError;
use ladle_core::models::{Language, PreferenceProfile};

/// Contract for recipe generation backends.
///
/// Implementations are stateless per call and issue at most one network
/// request per `generate` invocation. Retry policy, timeouts, and
/// cancellation belong to the caller, not the adapter.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Short machine name of this provider, used in logs and selection
    fn name(&self) -> &'static str;

    /// Produce raw response text for the given prompt.
    ///
    /// Network adapters use only the prompt pair; the mock also consults
    /// the profile to overlay preferences. The returned text is unparsed
    /// and may be fenced or padded with prose, which the shared parser
    /// strips.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Provider`] with the HTTP status for non-2xx
    /// responses, and without a status for transport failures or responses
    /// missing the expected text field.
    async fn generate(
        &self,
        prompt: &RecipePrompt,
        profile: Option<&PreferenceProfile>,
        lang: Language,
    ) -> Result<String, GenerateError>;
}

/// Maximum characters of a provider error body carried as error detail
const MAX_DETAIL_CHARS: usize = 300;

/// Trim a provider response body down to an error-detail snippet
pub(crate) fn body_snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_DETAIL_CHARS {
        trimmed.to_owned()
    } else {
        trimmed.chars().take(MAX_DETAIL_CHARS).collect()
    }
}
