// ABOUTME: Integration tests for the generation retry orchestrator
// ABOUTME: Scripted providers drive retry, timeout, backoff, and fatal-error paths
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! Retry policy tests running entirely on tokio's paused clock:
//! - retryable failures (5xx, statusless, validation, timeout) back off and retry
//! - non-retryable failures (4xx) and fatal errors (size limit) fail immediately
//! - exhausted attempts propagate the last observed error unchanged

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use ladle::config::GenerationConfig;
use ladle::errors::GenerateError;
use ladle::llm::{RecipePrompt, RecipeProvider};
use ladle::models::{Language, PreferenceProfile};
use ladle::services::generation::{GenerateRequest, GenerationService};

/// One scripted provider outcome
enum Step {
    /// Return this raw text
    Reply(String),
    /// Fail with an HTTP status
    Status(u16),
    /// Fail with a statusless provider error (transport failure)
    Transport,
    /// Return text that fails schema validation
    Invalid,
    /// Never respond (forces the per-attempt timeout)
    Hang,
}

/// Provider that replays a fixed script, one step per generate call
struct ScriptedProvider {
    script: Mutex<VecDeque<Step>>,
    calls: AtomicU32,
}

impl ScriptedProvider {
    fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(steps.into()),
            calls: AtomicU32::new(0),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(
        &self,
        _prompt: &RecipePrompt,
        _profile: Option<&PreferenceProfile>,
        _lang: Language,
    ) -> Result<String, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.script.lock().unwrap().pop_front().expect("script exhausted");
        match step {
            Step::Reply(text) => Ok(text),
            Step::Status(code) => Err(GenerateError::provider(Some(code), "scripted failure")),
            Step::Transport => Err(GenerateError::provider(None, "connection reset")),
            Step::Invalid => Ok("{\"title\": \"broken\"}".to_owned()),
            Step::Hang => {
                tokio::time::sleep(Duration::from_secs(86_400)).await;
                unreachable!("hang step must be cut off by the timeout")
            }
        }
    }
}

fn valid_recipe_json() -> String {
    r#"{
        "title": "Scripted Pasta",
        "prep_time_minutes": 10,
        "cook_time_minutes": 15,
        "servings": 2,
        "difficulty": "easy",
        "ingredients": ["200g pasta"],
        "instructions": ["Boil and drain."]
    }"#
    .to_owned()
}

/// A schema-valid recipe whose open nutrition map pushes the serialized
/// size past the 200 KiB ceiling
fn oversized_recipe_json() -> String {
    let mut nutrition = String::new();
    for i in 0..6_000 {
        nutrition.push_str(&format!("\"trace_mineral_{i:05}_milligrams_per_serving\": 0.125,"));
    }
    nutrition.pop();

    format!(
        r#"{{
            "title": "Oversized",
            "prep_time_minutes": 5,
            "cook_time_minutes": 5,
            "servings": 1,
            "difficulty": "easy",
            "ingredients": ["water"],
            "instructions": ["Pour."],
            "nutrition": {{{nutrition}}}
        }}"#
    )
}

fn service(provider: Arc<ScriptedProvider>, retries: u32) -> GenerationService {
    let config = GenerationConfig::default().with_max_retries(retries);
    GenerationService::with_provider(provider, config).with_rng_seed(42)
}

#[tokio::test(start_paused = true)]
async fn test_two_503s_then_success_retries_twice() {
    let provider = ScriptedProvider::new(vec![
        Step::Status(503),
        Step::Status(503),
        Step::Reply(valid_recipe_json()),
    ]);
    let svc = service(Arc::clone(&provider), 2);

    let started = tokio::time::Instant::now();
    let recipe = svc.generate_recipe(GenerateRequest::new("pasta")).await.unwrap();

    assert_eq!(recipe.title, "Scripted Pasta");
    assert_eq!(provider.calls(), 3);
    // Two backoff delays: >= 500ms then >= 1000ms, each with < 30% jitter
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(1_500), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(1_950), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_404_fails_immediately_without_retry() {
    let provider = ScriptedProvider::new(vec![Step::Status(404)]);
    let svc = service(Arc::clone(&provider), 3);

    let started = tokio::time::Instant::now();
    let err = svc.generate_recipe(GenerateRequest::new("pasta")).await.unwrap_err();

    assert_eq!(provider.calls(), 1);
    assert_eq!(err.status(), Some(404));
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_attempts_propagate_last_error_unchanged() {
    let provider = ScriptedProvider::new(vec![Step::Status(503), Step::Status(502)]);
    // Default config: 1 retry, 2 attempts total
    let svc = service(Arc::clone(&provider), 1);

    let err = svc.generate_recipe(GenerateRequest::new("pasta")).await.unwrap_err();

    assert_eq!(provider.calls(), 2);
    // The *last* error, not the first, and not wrapped
    assert!(matches!(err, GenerateError::Provider { status: Some(502), .. }));
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_is_retried() {
    let provider = ScriptedProvider::new(vec![Step::Transport, Step::Reply(valid_recipe_json())]);
    let svc = service(Arc::clone(&provider), 1);

    let recipe = svc.generate_recipe(GenerateRequest::new("pasta")).await.unwrap();
    assert_eq!(recipe.title, "Scripted Pasta");
    assert_eq!(provider.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_validation_failure_is_retried_as_flakiness() {
    let provider = ScriptedProvider::new(vec![Step::Invalid, Step::Reply(valid_recipe_json())]);
    let svc = service(Arc::clone(&provider), 1);

    let recipe = svc.generate_recipe(GenerateRequest::new("pasta")).await.unwrap();
    assert_eq!(recipe.title, "Scripted Pasta");
    assert_eq!(provider.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_hung_attempt_times_out_and_retries() {
    let provider = ScriptedProvider::new(vec![Step::Hang, Step::Reply(valid_recipe_json())]);
    let config = GenerationConfig::default()
        .with_max_retries(1)
        .with_request_timeout(Duration::from_secs(2));
    let svc = GenerationService::with_provider(provider.clone(), config).with_rng_seed(42);

    let recipe = svc.generate_recipe(GenerateRequest::new("pasta")).await.unwrap();
    assert_eq!(recipe.title, "Scripted Pasta");
    assert_eq!(provider.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_exhaustion_surfaces_timeout_error() {
    let provider = ScriptedProvider::new(vec![Step::Hang, Step::Hang]);
    let config = GenerationConfig::default()
        .with_max_retries(1)
        .with_request_timeout(Duration::from_secs(2));
    let svc = GenerationService::with_provider(provider.clone(), config).with_rng_seed(42);

    let err = svc.generate_recipe(GenerateRequest::new("pasta")).await.unwrap_err();
    assert!(matches!(err, GenerateError::Timeout));
    assert_eq!(provider.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_size_limit_is_fatal_on_the_first_attempt() {
    let provider = ScriptedProvider::new(vec![Step::Reply(oversized_recipe_json())]);
    // Plenty of retries available; none may be used
    let svc = service(Arc::clone(&provider), 5);

    let started = tokio::time::Instant::now();
    let err = svc.generate_recipe(GenerateRequest::new("pasta")).await.unwrap_err();

    assert_eq!(provider.calls(), 1);
    assert!(matches!(err, GenerateError::SizeLimit { .. }));
    assert!(!err.retryable());
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_request_classifies_as_timeout() {
    let provider = ScriptedProvider::new(vec![Step::Hang, Step::Hang]);
    let config = GenerationConfig::default().with_max_retries(1);
    let svc = GenerationService::with_provider(provider.clone(), config).with_rng_seed(42);

    let token = CancellationToken::new();
    token.cancel();

    let err = svc
        .generate_recipe(GenerateRequest::new("pasta").with_cancellation(token))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::Timeout));
}
