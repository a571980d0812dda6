// ABOUTME: Response parser turning raw provider text into a validated Recipe
// ABOUTME: Strips markdown fences, extracts the JSON object, parses, and validates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! # Response Parser / Validator
//!
//! Providers are instructed to reply with a bare JSON object, but models
//! routinely wrap output in a fenced code block or pad it with prose. The
//! parser tolerates both: it strips at most one wrapping fence, otherwise
//! takes the slice from the first `{` to the last `}`, then parses and
//! validates. Any failure is a [`GenerateError::Validation`] so the retry
//! orchestrator treats it as model flakiness.

use tracing::debug;

use ladle_core::errors::GenerateError;
use ladle_core::models::Recipe;

/// Parse raw provider text into a validated [`Recipe`].
///
/// Never returns a partially populated recipe: either every field parses
/// and passes its schema bound, or the whole response is rejected.
///
/// # Errors
///
/// Returns [`GenerateError::Validation`] when the text contains no JSON
/// object, when the JSON fails to deserialize, or when any field violates
/// its schema bound.
pub fn parse_recipe_response(raw: &str) -> Result<Recipe, GenerateError> {
    let json_text = extract_json(raw);

    debug!(raw_len = raw.len(), json_len = json_text.len(), "parsing provider response");

    let recipe: Recipe = serde_json::from_str(json_text)
        .map_err(|e| GenerateError::validation(format!("response is not valid recipe JSON: {e}")))?;

    recipe.validate()?;
    Ok(recipe)
}

/// Locate the JSON object inside possibly decorated provider text.
///
/// Order of preference: the body of a single wrapping code fence, then the
/// first-`{`-to-last-`}` slice, then the trimmed text as-is.
fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(fenced) = strip_code_fence(trimmed) {
        return fenced;
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Strip one wrapping ``` or ```json fence, returning the inner body.
fn strip_code_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?;
    // Language tag, if any, ends at the first newline
    let body = rest.find('\n').map_or(rest, |idx| &rest[idx + 1..]);
    let inner = body.strip_suffix("```").unwrap_or(body);
    Some(inner.trim())
}
