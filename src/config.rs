// ABOUTME: Environment-driven configuration for provider selection, retries, and language
// ABOUTME: Everything comes from environment variables with defaults (no config files)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

use std::env;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use ladle_core::models::Language;

/// Default retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 1;
/// Default per-attempt deadline in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
/// Default first backoff delay in milliseconds
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 500;
/// Default backoff ceiling in milliseconds
pub const DEFAULT_BACKOFF_CAP_MS: u64 = 5_000;
/// Default simulated latency of the mock provider in milliseconds
pub const DEFAULT_MOCK_DELAY_MS: u64 = 250;

/// Recipe provider selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat-completions API (requires `OPENAI_API_KEY`)
    OpenAi,
    /// Google Gemini generate-content API (requires `GEMINI_API_KEY`)
    Gemini,
    /// Offline deterministic mock, no credentials required (default)
    #[default]
    Mock,
}

impl ProviderKind {
    /// Environment variable name for provider selection
    pub const ENV_VAR: &'static str = "LADLE_AI_PROVIDER";

    /// Parse from string with fallback to the mock provider
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "openai" => Self::OpenAi,
            "gemini" | "google" => Self::Gemini,
            _ => Self::Mock,
        }
    }

    /// Load from the environment
    #[must_use]
    pub fn from_env() -> Self {
        env::var(Self::ENV_VAR)
            .map(|s| Self::from_str_or_default(&s))
            .unwrap_or_default()
    }

    /// Get the configuration token for this provider
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Mock => "mock",
        }
    }
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settings for the generation pipeline.
///
/// Threaded explicitly into [`crate::services::generation::GenerationService`]
/// so defaults (notably the output language) are never read from ambient
/// globals at call time. Network adapters read their own credentials from
/// the environment when constructed.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Which provider backend to construct
    pub provider: ProviderKind,

    /// Output language when neither the request nor the profile names one
    pub default_lang: Language,

    /// Retries after the first attempt (total attempts = 1 + retries)
    pub max_retries: u32,

    /// Per-attempt deadline for the provider call
    pub request_timeout: Duration,

    /// First backoff delay; doubles each retry
    pub backoff_base: Duration,

    /// Hard ceiling on a single backoff delay
    pub backoff_cap: Duration,

    /// Simulated latency of the mock provider
    pub mock_delay: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            default_lang: Language::default(),
            max_retries: DEFAULT_MAX_RETRIES,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            backoff_base: Duration::from_millis(DEFAULT_BACKOFF_BASE_MS),
            backoff_cap: Duration::from_millis(DEFAULT_BACKOFF_CAP_MS),
            mock_delay: Duration::from_millis(DEFAULT_MOCK_DELAY_MS),
        }
    }
}

impl GenerationConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `LADLE_AI_PROVIDER`, `LADLE_DEFAULT_LANG`,
    /// `LADLE_MAX_RETRIES`, `LADLE_REQUEST_TIMEOUT_MS`, `LADLE_MOCK_DELAY_MS`.
    /// Unset variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when a set variable fails to parse.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            provider: ProviderKind::from_env(),
            default_lang: Language::from_str_or_default(&env_var_or(
                "LADLE_DEFAULT_LANG",
                Language::default().as_str(),
            )),
            max_retries: env_parsed("LADLE_MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
            request_timeout: Duration::from_millis(env_parsed(
                "LADLE_REQUEST_TIMEOUT_MS",
                DEFAULT_REQUEST_TIMEOUT_MS,
            )?),
            backoff_base: Duration::from_millis(DEFAULT_BACKOFF_BASE_MS),
            backoff_cap: Duration::from_millis(DEFAULT_BACKOFF_CAP_MS),
            mock_delay: Duration::from_millis(env_parsed(
                "LADLE_MOCK_DELAY_MS",
                DEFAULT_MOCK_DELAY_MS,
            )?),
        })
    }

    /// Override the provider backend
    #[must_use]
    pub const fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    /// Override the default output language
    #[must_use]
    pub const fn with_default_lang(mut self, lang: Language) -> Self {
        self.default_lang = lang;
        self
    }

    /// Override the retry count
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Override the per-attempt deadline
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Override backoff timing (tests shrink these to keep runs fast)
    #[must_use]
    pub const fn with_backoff(mut self, base: Duration, cap: Duration) -> Self {
        self.backoff_base = base;
        self.backoff_cap = cap;
        self
    }

    /// Override the mock provider latency
    #[must_use]
    pub const fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = delay;
        self
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("invalid {key} value: {raw}")),
        Err(_) => Ok(default),
    }
}
