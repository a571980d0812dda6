// ABOUTME: Core data models for the Ladle recipe platform
// ABOUTME: Re-exports Recipe, PreferenceProfile, Language and related types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! # Data Models
//!
//! Core data structures shared by the generation pipeline and the query
//! planner.
//!
//! ## Core Models
//!
//! - `Recipe`: a validated AI-generated recipe (the wire schema)
//! - `RecipeRecord`: a stored row with id, language, and creation timestamp
//! - `RecipeSummary`: the page item projection of a record
//! - `PreferenceProfile`: optional caller preferences
//! - `DietType` / `Language` / `Difficulty`: closed enums with wire names

mod profile;
mod recipe;

pub use profile::{DietType, Language, PreferenceProfile};
pub use recipe::{
    Difficulty, Recipe, RecipeRecord, RecipeSummary, MAX_CUISINE_CHARS, MAX_DESCRIPTION_CHARS,
    MAX_INGREDIENTS, MAX_INGREDIENT_CHARS, MAX_INSTRUCTIONS, MAX_INSTRUCTION_CHARS,
    MAX_RECIPE_JSON_BYTES, MAX_SERVINGS, MAX_SUMMARY_CHARS, MAX_TAGS, MAX_TAG_CHARS,
    MAX_TIME_MINUTES, MAX_TITLE_CHARS, MIN_SERVINGS,
};
