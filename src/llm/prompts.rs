// ABOUTME: Prompt builder for recipe generation requests
// ABOUTME: Renders the schema contract, preference constraints, and language directive
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! # Recipe Prompt Builder
//!
//! Pure functions turning a free-text request plus an optional preference
//! profile into the system/user prompt pair every provider receives. The
//! system prompt carries everything the model must obey regardless of the
//! request text: the language directive, the exact output schema (field
//! for field, so the parser on the other side can hold providers to it),
//! and the caller's dietary constraints rendered in the target language's
//! label set. The user prompt is the free text alone. Same inputs always
//! produce byte-identical prompts.

use ladle_core::models::{DietType, Difficulty, Language, PreferenceProfile};

/// The output contract advertised to providers.
///
/// Field names and bounds must stay in lockstep with
/// [`Recipe`](ladle_core::models::Recipe); the parser rejects anything
/// that strays.
const RECIPE_SCHEMA_CONTRACT: &str = r#"JSON Schema:
{
  "title": "string (1-200 chars)",
  "summary": "string (max 500 chars), optional",
  "description": "string (max 2000 chars), optional",
  "prep_time_minutes": "integer (0-1440)",
  "cook_time_minutes": "integer (0-1440)",
  "servings": "integer (1-100)",
  "difficulty": "one of: easy, medium, hard",
  "cuisine": "string (max 50 chars), optional",
  "ingredients": ["string (1-500 chars), 1-100 items"],
  "instructions": ["string (1-2000 chars), 1-50 steps"],
  "tags": ["string (max 50 chars), up to 20 items"],
  "dietary_info": {"flag name": "boolean"},
  "nutrition": {"value name": "number"}
}"#;

/// System and user prompt pair for one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePrompt {
    /// Language directive, schema contract, and rendered preference
    /// constraints
    pub system: String,
    /// The caller's free-text request, unchanged apart from trimming
    pub user: String,
}

/// Build the prompt pair for a recipe request.
///
/// `lang` must already be resolved (request override, then profile
/// preference, then configured default); the builder only renders it.
#[must_use]
pub fn build_recipe_prompt(
    request: &str,
    profile: Option<&PreferenceProfile>,
    lang: Language,
) -> RecipePrompt {
    RecipePrompt {
        system: render_system_prompt(profile, lang),
        user: format!("Create a recipe for: {}", request.trim()),
    }
}

fn render_system_prompt(profile: Option<&PreferenceProfile>, lang: Language) -> String {
    let mut sections = vec![format!(
        "You are a professional recipe developer. The user describes a dish they want; \
respond with one complete, realistic recipe.\n\n\
IMPORTANT RULES:\n\
- Write ALL recipe text fields in {}.\n\
- Respond with ONLY a single valid JSON object matching the exact schema below. \
No prose before or after, no markdown fences.\n\
- \"difficulty\" must be exactly one of: \"easy\", \"medium\", \"hard\".\n\
- \"dietary_info\" holds boolean flags such as \"vegan\", \"vegetarian\", \
\"gluten_free\"; set every flag that applies to the recipe.\n\
- \"nutrition\" holds per-serving numbers such as \"calories\", \"protein_g\", \
\"carbs_g\", \"fat_g\".\n\
- Stay within every stated length and range limit.",
        lang.english_name()
    )];

    if let Some(block) = render_constraints(profile, lang) {
        sections.push(block);
    }
    sections.push(RECIPE_SCHEMA_CONTRACT.to_owned());

    sections.join("\n\n")
}

/// Render the profile into constraint lines, labels localized to `lang`.
/// Returns `None` when the profile is absent or carries no constraints.
fn render_constraints(profile: Option<&PreferenceProfile>, lang: Language) -> Option<String> {
    let profile = profile?;
    let mut lines = vec!["CALLER CONSTRAINTS:".to_owned()];

    if let Some(diet) = profile.diet {
        lines.push(format!(
            "- Dietary requirement: {} (follow this diet strictly).",
            diet_label(diet, lang)
        ));
    }
    if !profile.allergies.is_empty() {
        lines.push(format!(
            "- Allergies, must never appear: {}.",
            profile.allergies.join(", ")
        ));
    }
    if !profile.disliked_ingredients.is_empty() {
        lines.push(format!(
            "- Avoid these ingredients where possible: {}.",
            profile.disliked_ingredients.join(", ")
        ));
    }
    if !profile.preferred_cuisines.is_empty() {
        lines.push(format!(
            "- Preferred cuisines: {}.",
            profile.preferred_cuisines.join(", ")
        ));
    }
    if let Some(level) = profile.skill_level {
        lines.push(format!(
            "- Keep the difficulty suitable for a cook at the {} level.",
            difficulty_label(level, lang)
        ));
    }

    (lines.len() > 1).then(|| lines.join("\n"))
}

/// Localized diet name used in constraint lines
const fn diet_label(diet: DietType, lang: Language) -> &'static str {
    match lang {
        Language::En => match diet {
            DietType::Vegan => "vegan",
            DietType::Vegetarian => "vegetarian",
            DietType::Pescatarian => "pescatarian",
            DietType::GlutenFree => "gluten-free",
            DietType::DairyFree => "dairy-free",
            DietType::Keto => "ketogenic",
            DietType::Paleo => "paleo",
            DietType::LowCarb => "low-carb",
            DietType::Mediterranean => "Mediterranean",
            DietType::Halal => "halal",
        },
        Language::De => match diet {
            DietType::Vegan => "vegan",
            DietType::Vegetarian => "vegetarisch",
            DietType::Pescatarian => "pescetarisch",
            DietType::GlutenFree => "glutenfrei",
            DietType::DairyFree => "milchfrei",
            DietType::Keto => "ketogen",
            DietType::Paleo => "Paleo",
            DietType::LowCarb => "kohlenhydratarm",
            DietType::Mediterranean => "mediterran",
            DietType::Halal => "halal",
        },
        Language::Fr => match diet {
            DietType::Vegan => "végétalien",
            DietType::Vegetarian => "végétarien",
            DietType::Pescatarian => "pescétarien",
            DietType::GlutenFree => "sans gluten",
            DietType::DairyFree => "sans produits laitiers",
            DietType::Keto => "cétogène",
            DietType::Paleo => "paléo",
            DietType::LowCarb => "pauvre en glucides",
            DietType::Mediterranean => "méditerranéen",
            DietType::Halal => "halal",
        },
        Language::Es => match diet {
            DietType::Vegan => "vegano",
            DietType::Vegetarian => "vegetariano",
            DietType::Pescatarian => "pescetariano",
            DietType::GlutenFree => "sin gluten",
            DietType::DairyFree => "sin lácteos",
            DietType::Keto => "cetogénico",
            DietType::Paleo => "paleo",
            DietType::LowCarb => "bajo en carbohidratos",
            DietType::Mediterranean => "mediterráneo",
            DietType::Halal => "halal",
        },
    }
}

/// Localized difficulty name used in constraint lines
const fn difficulty_label(level: Difficulty, lang: Language) -> &'static str {
    match lang {
        Language::En => match level {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        },
        Language::De => match level {
            Difficulty::Easy => "einfach",
            Difficulty::Medium => "mittel",
            Difficulty::Hard => "schwierig",
        },
        Language::Fr => match level {
            Difficulty::Easy => "facile",
            Difficulty::Medium => "intermédiaire",
            Difficulty::Hard => "difficile",
        },
        Language::Es => match level {
            Difficulty::Easy => "fácil",
            Difficulty::Medium => "media",
            Difficulty::Hard => "difícil",
        },
    }
}
