// ABOUTME: Retry orchestrator for recipe generation
// ABOUTME: Owns per-attempt timeouts, failure classification, backoff, and cancellation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! # Generation Service
//!
//! The only place retry-vs-fail decisions are made. Each attempt runs the
//! configured provider under a timeout and a cancellation token; failures
//! are classified through [`GenerateError::retryable`], retries sleep a
//! capped exponential backoff with jitter, and a non-retryable failure or
//! exhausted attempts propagate the last observed error unchanged.
//!
//! Adapters never retry on their own, and the parser never decides policy:
//! both simply classify. Independent requests share no mutable state apart
//! from the jitter RNG, which is behind a mutex and injectable for
//! deterministic tests.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument, warn};

use ladle_core::errors::GenerateError;
use ladle_core::models::{Language, PreferenceProfile, Recipe, MAX_RECIPE_JSON_BYTES};

use crate::config::GenerationConfig;
use crate::llm::{
    build_recipe_prompt, parse_recipe_response, RecipeBackend, RecipePrompt, RecipeProvider,
};

/// Upper bound on the uniform backoff jitter fraction
const JITTER_MAX: f64 = 0.3;

/// One recipe generation request
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Free-text description of the dish
    pub prompt: String,

    /// Optional caller preferences
    pub profile: Option<PreferenceProfile>,

    /// Explicit output language, overriding the profile and the default
    pub lang: Option<Language>,

    /// Cancellation signal scoped to this request; every attempt runs
    /// under a child of this token
    pub cancel: Option<CancellationToken>,
}

impl GenerateRequest {
    /// Create a request from free text
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// Attach a preference profile
    #[must_use]
    pub fn with_profile(mut self, profile: PreferenceProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Override the output language
    #[must_use]
    pub const fn with_lang(mut self, lang: Language) -> Self {
        self.lang = Some(lang);
        self
    }

    /// Attach a cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Recipe generation orchestrator
pub struct GenerationService {
    provider: Arc<dyn RecipeProvider>,
    config: GenerationConfig,
    /// Jitter source; seeded in tests via [`Self::with_rng_seed`]
    rng: Mutex<StdRng>,
}

impl GenerationService {
    /// Create a service over a configured backend
    #[must_use]
    pub fn new(backend: RecipeBackend, config: GenerationConfig) -> Self {
        Self::with_provider(Arc::new(backend), config)
    }

    /// Create a service over any provider implementation (tests inject
    /// scripted fakes here)
    #[must_use]
    pub fn with_provider(provider: Arc<dyn RecipeProvider>, config: GenerationConfig) -> Self {
        Self {
            provider,
            config,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Seed the jitter RNG for deterministic backoff in tests
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Generate a validated recipe for the request.
    ///
    /// Language resolution order: explicit request override, then the
    /// profile's preferred language, then the configured default. Prompts
    /// are built once and reused across attempts.
    ///
    /// # Errors
    ///
    /// Returns the last observed [`GenerateError`] when every attempt
    /// fails or a non-retryable error occurs; the error kind is never
    /// re-wrapped. A cancelled request surfaces as
    /// [`GenerateError::Timeout`].
    #[instrument(skip(self, request), fields(provider = self.provider.name()))]
    pub async fn generate_recipe(&self, request: GenerateRequest) -> Result<Recipe, GenerateError> {
        let lang = request
            .lang
            .or_else(|| request.profile.as_ref().and_then(|p| p.preferred_lang))
            .unwrap_or(self.config.default_lang);

        let prompt = build_recipe_prompt(&request.prompt, request.profile.as_ref(), lang);
        let cancel = request.cancel.unwrap_or_default();

        let total_attempts = self.config.max_retries + 1;
        let mut attempt = 0_u32;

        loop {
            attempt += 1;
            debug!(attempt, total_attempts, %lang, "starting generation attempt");

            let result = self
                .run_attempt(&prompt, request.profile.as_ref(), lang, &cancel)
                .await;

            match result {
                Ok(recipe) => {
                    debug!(attempt, title = %recipe.title, "generation succeeded");
                    return Ok(recipe);
                }
                Err(err) => {
                    if !err.retryable() || attempt >= total_attempts {
                        error!(attempt, error = %err, "generation failed");
                        return Err(err);
                    }

                    let delay = self.backoff_delay(attempt);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "attempt failed, backing off before retry"
                    );

                    tokio::select! {
                        () = cancel.cancelled() => return Err(GenerateError::Timeout),
                        () = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }
    }

    /// One provider call under timeout and cancellation, then parse,
    /// validate, and check the size ceiling.
    async fn run_attempt(
        &self,
        prompt: &RecipePrompt,
        profile: Option<&PreferenceProfile>,
        lang: Language,
        cancel: &CancellationToken,
    ) -> Result<Recipe, GenerateError> {
        let attempt_token = cancel.child_token();

        let raw = tokio::select! {
            () = attempt_token.cancelled() => return Err(GenerateError::Timeout),
            outcome = tokio::time::timeout(
                self.config.request_timeout,
                self.provider.generate(prompt, profile, lang),
            ) => match outcome {
                Ok(inner) => inner?,
                Err(_) => return Err(GenerateError::Timeout),
            },
        };

        let recipe = parse_recipe_response(&raw)?;

        // The open dietary/nutrition maps make the serialized size
        // unbounded even for a schema-valid recipe
        let bytes = serde_json::to_vec(&recipe)
            .map_err(|e| GenerateError::validation(format!("recipe failed to serialize: {e}")))?
            .len();
        if bytes >= MAX_RECIPE_JSON_BYTES {
            return Err(GenerateError::SizeLimit { bytes });
        }

        Ok(recipe)
    }

    /// Delay before retry `i`: `min(base * 2^(i-1) * (1 + jitter), cap)`
    /// with jitter uniform in `[0, 0.3)`
    fn backoff_delay(&self, retry: u32) -> Duration {
        let base_ms = self.config.backoff_base.as_millis() as f64;
        let cap_ms = self.config.backoff_cap.as_millis() as f64;

        let jitter = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(0.0..JITTER_MAX);

        let delay_ms = (base_ms * 2_f64.powi(retry as i32 - 1) * (1.0 + jitter)).min(cap_ms);
        Duration::from_millis(delay_ms as u64)
    }
}
