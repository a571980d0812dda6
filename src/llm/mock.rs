// ABOUTME: Offline deterministic recipe provider for development and testing
// ABOUTME: Classifies prompts into fixed archetypes and overlays caller preferences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! # Mock Recipe Provider
//!
//! A fully offline [`RecipeProvider`] for development, CI, and
//! demonstrations. It never performs I/O: the user prompt is classified by
//! keyword into one of six recipe archetypes, caller preferences are
//! overlaid (diet flags, avoided ingredients, preferred cuisine, skill
//! cap), and the result is serialized to the same JSON shape the network
//! providers return, after a configured simulated delay.
//!
//! The delay is injected at construction so tests under tokio's paused
//! clock stay deterministic; there is no randomness anywhere in this
//! provider.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use ladle_core::errors::GenerateError;
use ladle_core::models::{Difficulty, Language, PreferenceProfile, Recipe};

use super::{RecipePrompt, RecipeProvider};

/// The fixed archetype set the mock chooses from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Archetype {
    Pasta,
    Salad,
    Soup,
    Curry,
    Breakfast,
    /// Fallback when no keyword matches
    Skillet,
}

impl Archetype {
    /// Keyword classification over the lowercased user prompt
    fn classify(prompt: &str) -> Self {
        let text = prompt.to_lowercase();
        let matches_any = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if matches_any(&["pasta", "spaghetti", "noodle", "lasagna", "macaroni"]) {
            Self::Pasta
        } else if matches_any(&["salad", "slaw", "bowl"]) {
            Self::Salad
        } else if matches_any(&["soup", "stew", "broth", "chowder"]) {
            Self::Soup
        } else if matches_any(&["curry", "masala", "korma"]) {
            Self::Curry
        } else if matches_any(&["breakfast", "pancake", "omelet", "oatmeal", "porridge", "eggs"]) {
            Self::Breakfast
        } else {
            Self::Skillet
        }
    }
}

/// Offline recipe provider returning archetype recipes with preference overlays
#[derive(Debug, Clone)]
pub struct MockRecipeProvider {
    /// Simulated provider latency, awaited before the response is returned
    delay: Duration,
}

impl MockRecipeProvider {
    /// Create a mock provider with the given simulated latency
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Create a mock provider with no simulated latency
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Build the archetype recipe, before any preference overlay
    fn base_recipe(archetype: Archetype) -> Recipe {
        match archetype {
            Archetype::Pasta => recipe(
                "Garlic Tomato Pasta",
                "A quick pantry pasta with a garlicky tomato sauce.",
                10,
                20,
                4,
                Difficulty::Easy,
                "Italian",
                &[
                    "400g dried pasta",
                    "1 can crushed tomatoes",
                    "4 cloves garlic, sliced",
                    "3 tbsp olive oil",
                    "1 tsp chili flakes",
                    "salt and black pepper",
                    "fresh basil leaves",
                ],
                &[
                    "Cook the pasta in well-salted boiling water until al dente.",
                    "Warm the olive oil and fry the garlic until fragrant.",
                    "Add the tomatoes and chili flakes; simmer for 10 minutes.",
                    "Toss the drained pasta through the sauce with a splash of pasta water.",
                    "Season, tear in the basil, and serve.",
                ],
                &["pasta", "quick", "weeknight"],
                &[("vegetarian", true), ("vegan", false), ("gluten_free", false)],
                &[("calories", 520.0), ("protein_g", 15.0), ("carbs_g", 88.0), ("fat_g", 12.0)],
            ),
            Archetype::Salad => recipe(
                "Crunchy Chickpea Salad",
                "A bright salad of chickpeas, cucumber, and herbs in a lemon dressing.",
                15,
                0,
                2,
                Difficulty::Easy,
                "Mediterranean",
                &[
                    "1 can chickpeas, drained",
                    "1 cucumber, diced",
                    "200g cherry tomatoes, halved",
                    "1 small red onion, thinly sliced",
                    "1 handful parsley, chopped",
                    "juice of 1 lemon",
                    "3 tbsp olive oil",
                ],
                &[
                    "Combine the chickpeas and vegetables in a large bowl.",
                    "Whisk the lemon juice and olive oil with a pinch of salt.",
                    "Toss the salad with the dressing and the parsley.",
                    "Rest for 10 minutes before serving so the flavors mingle.",
                ],
                &["salad", "fresh", "no_cook"],
                &[("vegan", true), ("vegetarian", true), ("dairy_free", true), ("gluten_free", true)],
                &[("calories", 340.0), ("protein_g", 12.0), ("carbs_g", 38.0), ("fat_g", 16.0)],
            ),
            Archetype::Soup => recipe(
                "Smoky Lentil Soup",
                "A warming red lentil soup with smoked paprika and carrots.",
                10,
                30,
                4,
                Difficulty::Easy,
                "Turkish",
                &[
                    "250g red lentils, rinsed",
                    "2 carrots, diced",
                    "1 onion, diced",
                    "2 cloves garlic, minced",
                    "1 tsp smoked paprika",
                    "1.2l vegetable stock",
                    "2 tbsp olive oil",
                ],
                &[
                    "Soften the onion, carrot, and garlic in the olive oil.",
                    "Stir in the paprika, then the lentils and stock.",
                    "Simmer for 25 minutes until the lentils collapse.",
                    "Blend half the soup for body and season to taste.",
                ],
                &["soup", "comfort", "make_ahead"],
                &[("vegan", true), ("vegetarian", true), ("dairy_free", true), ("gluten_free", true)],
                &[("calories", 310.0), ("protein_g", 16.0), ("carbs_g", 45.0), ("fat_g", 7.0)],
            ),
            Archetype::Curry => recipe(
                "Coconut Vegetable Curry",
                "A mild coconut curry loaded with seasonal vegetables.",
                15,
                25,
                4,
                Difficulty::Medium,
                "Indian",
                &[
                    "1 cauliflower, cut into florets",
                    "2 potatoes, cubed",
                    "1 can coconut milk",
                    "2 tbsp curry paste",
                    "1 onion, sliced",
                    "150g green peas",
                    "2 tbsp neutral oil",
                    "steamed rice, to serve",
                ],
                &[
                    "Fry the onion in the oil until golden, then stir in the curry paste.",
                    "Add the cauliflower and potatoes and coat them in the paste.",
                    "Pour in the coconut milk and simmer for 20 minutes.",
                    "Stir through the peas, season, and serve over rice.",
                ],
                &["curry", "one_pot"],
                &[("vegan", true), ("vegetarian", true), ("dairy_free", true), ("gluten_free", true)],
                &[("calories", 450.0), ("protein_g", 11.0), ("carbs_g", 52.0), ("fat_g", 22.0)],
            ),
            Archetype::Breakfast => recipe(
                "Fluffy Oat Pancakes",
                "Weekend pancakes made with blended oats and banana.",
                10,
                15,
                3,
                Difficulty::Easy,
                "American",
                &[
                    "150g rolled oats",
                    "1 ripe banana",
                    "2 eggs",
                    "200ml milk",
                    "1 tsp baking powder",
                    "butter, for the pan",
                    "maple syrup, to serve",
                ],
                &[
                    "Blend the oats to a coarse flour.",
                    "Blend in the banana, eggs, milk, and baking powder.",
                    "Rest the batter for 5 minutes while the pan heats.",
                    "Cook small pancakes in butter until bubbles set, then flip.",
                    "Serve warm with maple syrup.",
                ],
                &["breakfast", "weekend"],
                &[("vegetarian", true), ("vegan", false), ("gluten_free", false)],
                &[("calories", 380.0), ("protein_g", 14.0), ("carbs_g", 55.0), ("fat_g", 11.0)],
            ),
            Archetype::Skillet => recipe(
                "Weeknight Vegetable Skillet",
                "A flexible one-pan dinner of beans, greens, and whatever is in the crisper.",
                10,
                20,
                2,
                Difficulty::Easy,
                "Fusion",
                &[
                    "1 can white beans, drained",
                    "1 zucchini, sliced",
                    "1 bell pepper, sliced",
                    "2 cloves garlic, minced",
                    "2 big handfuls spinach",
                    "2 tbsp olive oil",
                    "1 tsp dried oregano",
                ],
                &[
                    "Saute the zucchini and pepper in the olive oil until browned.",
                    "Add the garlic and oregano and cook for one minute.",
                    "Stir in the beans and a splash of water; warm through.",
                    "Fold in the spinach until just wilted and season well.",
                ],
                &["one_pan", "weeknight"],
                &[("vegan", true), ("vegetarian", true), ("dairy_free", true), ("gluten_free", true)],
                &[("calories", 390.0), ("protein_g", 17.0), ("carbs_g", 41.0), ("fat_g", 17.0)],
            ),
        }
    }

    /// Overlay caller preferences onto the archetype recipe
    fn apply_profile(recipe: &mut Recipe, profile: &PreferenceProfile) {
        if let Some(diet) = profile.diet {
            for flag in diet.implied_flags() {
                recipe.dietary_info.insert((*flag).to_owned(), true);
            }
            let tag = diet.as_str().to_owned();
            if !recipe.tags.contains(&tag) {
                recipe.tags.push(tag);
            }
        }

        let avoided: Vec<&String> = profile
            .allergies
            .iter()
            .chain(profile.disliked_ingredients.iter())
            .collect();
        if !avoided.is_empty() {
            recipe.ingredients.retain(|line| {
                let lower = line.to_lowercase();
                !avoided.iter().any(|a| lower.contains(&a.to_lowercase()))
            });
            // Removing every line would break the schema; keep a base
            if recipe.ingredients.is_empty() {
                recipe.ingredients.push("pantry staples of your choice".to_owned());
            }
            let note = format!(
                "Made without: {}.",
                avoided.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
            );
            recipe.description = Some(match recipe.description.take() {
                Some(existing) => format!("{existing} {note}"),
                None => note,
            });
        }

        if let Some(cuisine) = profile.preferred_cuisines.first() {
            recipe.cuisine = Some(cuisine.clone());
        }

        if let Some(skill) = profile.skill_level {
            if difficulty_rank(recipe.difficulty) > difficulty_rank(skill) {
                recipe.difficulty = skill;
            }
        }
    }
}

const fn difficulty_rank(level: Difficulty) -> u8 {
    match level {
        Difficulty::Easy => 0,
        Difficulty::Medium => 1,
        Difficulty::Hard => 2,
    }
}

#[async_trait]
impl RecipeProvider for MockRecipeProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    #[instrument(skip(self, prompt, profile), fields(lang = %lang))]
    async fn generate(
        &self,
        prompt: &RecipePrompt,
        profile: Option<&PreferenceProfile>,
        lang: Language,
    ) -> Result<String, GenerateError> {
        let archetype = Archetype::classify(&prompt.user);
        debug!(?archetype, "mock provider classified prompt");

        let mut recipe = Self::base_recipe(archetype);
        if let Some(profile) = profile {
            Self::apply_profile(&mut recipe, profile);
        }

        tokio::time::sleep(self.delay).await;

        serde_json::to_string(&recipe)
            .map_err(|e| GenerateError::provider(None, format!("mock serialization failed: {e}")))
    }
}

/// Terse archetype constructor; keeps the table above readable
#[allow(clippy::too_many_arguments)]
fn recipe(
    title: &str,
    summary: &str,
    prep: u32,
    cook: u32,
    servings: u32,
    difficulty: Difficulty,
    cuisine: &str,
    ingredients: &[&str],
    instructions: &[&str],
    tags: &[&str],
    dietary: &[(&str, bool)],
    nutrition: &[(&str, f64)],
) -> Recipe {
    Recipe {
        title: title.to_owned(),
        summary: Some(summary.to_owned()),
        description: None,
        prep_time_minutes: prep,
        cook_time_minutes: cook,
        servings,
        difficulty,
        cuisine: Some(cuisine.to_owned()),
        ingredients: ingredients.iter().map(|s| (*s).to_owned()).collect(),
        instructions: instructions.iter().map(|s| (*s).to_owned()).collect(),
        tags: tags.iter().map(|s| (*s).to_owned()).collect(),
        dietary_info: dietary.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect::<BTreeMap<_, _>>(),
        nutrition: nutrition.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect::<BTreeMap<_, _>>(),
    }
}
