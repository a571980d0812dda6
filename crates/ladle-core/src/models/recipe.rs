// ABOUTME: Recipe data model with schema bounds and validation
// ABOUTME: Defines Recipe, Difficulty, RecipeRecord, and RecipeSummary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::GenerateError;

use super::profile::Language;

/// Maximum characters in a recipe title
pub const MAX_TITLE_CHARS: usize = 200;
/// Maximum characters in a recipe summary
pub const MAX_SUMMARY_CHARS: usize = 500;
/// Maximum characters in a recipe description
pub const MAX_DESCRIPTION_CHARS: usize = 2000;
/// Maximum prep or cook time in minutes (24 hours)
pub const MAX_TIME_MINUTES: u32 = 1440;
/// Minimum servings per recipe
pub const MIN_SERVINGS: u32 = 1;
/// Maximum servings per recipe
pub const MAX_SERVINGS: u32 = 100;
/// Maximum characters in a cuisine name
pub const MAX_CUISINE_CHARS: usize = 50;
/// Maximum number of ingredients
pub const MAX_INGREDIENTS: usize = 100;
/// Maximum characters per ingredient line
pub const MAX_INGREDIENT_CHARS: usize = 500;
/// Maximum number of instruction steps
pub const MAX_INSTRUCTIONS: usize = 50;
/// Maximum characters per instruction step
pub const MAX_INSTRUCTION_CHARS: usize = 2000;
/// Maximum number of tags
pub const MAX_TAGS: usize = 20;
/// Maximum characters per tag
pub const MAX_TAG_CHARS: usize = 50;
/// Hard ceiling on the serialized JSON size of a recipe (200 KiB)
pub const MAX_RECIPE_JSON_BYTES: usize = 200 * 1024;

/// Difficulty rating of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Minimal technique, forgiving timing
    Easy,
    /// Some technique or multitasking required
    Medium,
    /// Advanced technique or precise timing required
    Hard,
}

impl Difficulty {
    /// Parse a difficulty from user input (case-insensitive)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    /// Get the wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// A validated AI-generated recipe.
///
/// Field names are the wire contract: the prompt builder advertises exactly
/// these snake_case names and the parser deserializes provider output into
/// this shape. `title`, timing, `servings`, `difficulty`, `ingredients`,
/// and `instructions` are required; everything else defaults.
///
/// The `dietary_info` and `nutrition` maps are open-ended: unknown keys
/// supplied by a provider are preserved verbatim through serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe name (1-200 characters)
    pub title: String,

    /// One-or-two sentence teaser (up to 500 characters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Longer free-form description (up to 2000 characters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Preparation time in minutes (0-1440)
    pub prep_time_minutes: u32,

    /// Cooking time in minutes (0-1440)
    pub cook_time_minutes: u32,

    /// Number of servings produced (1-100)
    pub servings: u32,

    /// Difficulty rating
    pub difficulty: Difficulty,

    /// Cuisine name (up to 50 characters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,

    /// Ingredient lines (1-100 items, each 1-500 characters)
    pub ingredients: Vec<String>,

    /// Instruction steps (1-50 items, each 1-2000 characters)
    pub instructions: Vec<String>,

    /// Free-form tags (up to 20, each up to 50 characters)
    #[serde(default)]
    pub tags: Vec<String>,

    /// Open dietary flags, e.g. `{"vegan": true, "gluten_free": false}`
    #[serde(default)]
    pub dietary_info: BTreeMap<String, bool>,

    /// Open nutrition values, e.g. `{"calories": 420.0, "protein_g": 12.5}`
    #[serde(default)]
    pub nutrition: BTreeMap<String, f64>,
}

impl Recipe {
    /// Check every schema bound, reporting the first violation.
    ///
    /// Bounds on text fields count Unicode scalar values, not bytes, so a
    /// 200-character title is valid regardless of script.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Validation`] naming the offending field and
    /// the observed value.
    pub fn validate(&self) -> Result<(), GenerateError> {
        text_in_range("title", &self.title, 1, MAX_TITLE_CHARS)?;
        if let Some(summary) = &self.summary {
            text_in_range("summary", summary, 0, MAX_SUMMARY_CHARS)?;
        }
        if let Some(description) = &self.description {
            text_in_range("description", description, 0, MAX_DESCRIPTION_CHARS)?;
        }
        int_in_range("prep_time_minutes", self.prep_time_minutes, 0, MAX_TIME_MINUTES)?;
        int_in_range("cook_time_minutes", self.cook_time_minutes, 0, MAX_TIME_MINUTES)?;
        int_in_range("servings", self.servings, MIN_SERVINGS, MAX_SERVINGS)?;
        if let Some(cuisine) = &self.cuisine {
            text_in_range("cuisine", cuisine, 0, MAX_CUISINE_CHARS)?;
        }
        count_in_range("ingredients", self.ingredients.len(), 1, MAX_INGREDIENTS)?;
        for (idx, line) in self.ingredients.iter().enumerate() {
            text_in_range(&format!("ingredients[{idx}]"), line, 1, MAX_INGREDIENT_CHARS)?;
        }
        count_in_range("instructions", self.instructions.len(), 1, MAX_INSTRUCTIONS)?;
        for (idx, step) in self.instructions.iter().enumerate() {
            text_in_range(&format!("instructions[{idx}]"), step, 1, MAX_INSTRUCTION_CHARS)?;
        }
        count_in_range("tags", self.tags.len(), 0, MAX_TAGS)?;
        for (idx, tag) in self.tags.iter().enumerate() {
            text_in_range(&format!("tags[{idx}]"), tag, 0, MAX_TAG_CHARS)?;
        }
        Ok(())
    }

    /// Combined prep and cook time in minutes
    #[must_use]
    pub const fn total_time_minutes(&self) -> u32 {
        self.prep_time_minutes.saturating_add(self.cook_time_minutes)
    }
}

fn text_in_range(field: &str, value: &str, min: usize, max: usize) -> Result<(), GenerateError> {
    let count = value.chars().count();
    if count < min || count > max {
        return Err(GenerateError::validation(format!(
            "{field} must be between {min} and {max} characters, got {count}"
        )));
    }
    Ok(())
}

fn int_in_range(field: &str, value: u32, min: u32, max: u32) -> Result<(), GenerateError> {
    if value < min || value > max {
        return Err(GenerateError::validation(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

fn count_in_range(field: &str, len: usize, min: usize, max: usize) -> Result<(), GenerateError> {
    if len < min || len > max {
        return Err(GenerateError::validation(format!(
            "{field} must contain between {min} and {max} items, got {len}"
        )));
    }
    Ok(())
}

/// A stored recipe row: the validated recipe plus listing metadata.
///
/// `(created_at, id)` is the total order the cursor codec and query planner
/// paginate over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRecord {
    /// Row identifier (UUID v4)
    pub id: Uuid,

    /// Language the recipe was generated in
    pub lang: Language,

    /// Creation timestamp, the primary sort key
    pub created_at: DateTime<Utc>,

    /// The validated recipe payload
    pub recipe: Recipe,
}

impl RecipeRecord {
    /// Wrap a validated recipe into a new row with a fresh id and timestamp
    #[must_use]
    pub fn new(recipe: Recipe, lang: Language) -> Self {
        Self {
            id: Uuid::new_v4(),
            lang,
            created_at: Utc::now(),
            recipe,
        }
    }

    /// Override the row id (seeding and tests)
    #[must_use]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Override the creation timestamp (seeding and tests)
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Page item projection of a stored recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Row identifier
    pub id: Uuid,

    /// Recipe title
    pub title: String,

    /// Teaser text, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Difficulty rating
    pub difficulty: Difficulty,

    /// Combined prep and cook time in minutes
    pub total_time_minutes: u32,

    /// Number of servings
    pub servings: u32,

    /// Cuisine name, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,

    /// Recipe tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Recipe language
    pub lang: Language,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<&RecipeRecord> for RecipeSummary {
    fn from(record: &RecipeRecord) -> Self {
        Self {
            id: record.id,
            title: record.recipe.title.clone(),
            summary: record.recipe.summary.clone(),
            difficulty: record.recipe.difficulty,
            total_time_minutes: record.recipe.total_time_minutes(),
            servings: record.recipe.servings,
            cuisine: record.recipe.cuisine.clone(),
            tags: record.recipe.tags.clone(),
            lang: record.lang,
            created_at: record.created_at,
        }
    }
}
