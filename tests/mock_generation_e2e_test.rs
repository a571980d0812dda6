// ABOUTME: End-to-end tests driving the generation service over the mock backend
// ABOUTME: Covers prompting, profile overlays, storage, and subsequent listing
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! Full-pipeline coverage with no network: a prompt goes through the
//! service, comes back as a validated recipe, is persisted, and shows up
//! on a listed page.

use std::time::Duration;

use ladle::config::{GenerationConfig, ProviderKind};
use ladle::llm::RecipeBackend;
use ladle::models::{DietType, Difficulty, Language, PreferenceProfile, RecipeRecord};
use ladle::services::generation::{GenerateRequest, GenerationService};
use ladle::services::listing::{list_recipes, ListQuery};
use ladle::store::{InMemoryRecipeStore, RecipeStore};

fn mock_service() -> GenerationService {
    let config = GenerationConfig::default()
        .with_provider(ProviderKind::Mock)
        .with_mock_delay(Duration::ZERO);
    let backend = RecipeBackend::from_config(&config).unwrap();
    GenerationService::new(backend, config)
}

#[tokio::test]
async fn test_vegan_pasta_prompt_yields_a_compliant_recipe() {
    let service = mock_service();
    let profile = PreferenceProfile::new().with_diet(DietType::Vegan);
    let request = GenerateRequest::new("quick vegan pasta")
        .with_profile(profile)
        .with_lang(Language::En);

    let recipe = service.generate_recipe(request).await.unwrap();

    assert!(recipe.title.to_lowercase().contains("pasta"));
    assert_eq!(recipe.dietary_info.get("vegan"), Some(&true));
    assert_eq!(recipe.dietary_info.get("dairy_free"), Some(&true));
    assert!(recipe.tags.contains(&"vegan".to_owned()));
    assert!(!recipe.ingredients.is_empty());
    assert!(!recipe.instructions.is_empty());
}

#[tokio::test]
async fn test_allergies_and_dislikes_are_kept_out_of_the_ingredient_list() {
    let service = mock_service();
    let profile = PreferenceProfile::new()
        .with_allergies(vec!["peanut".to_owned()])
        .with_disliked_ingredients(vec!["cilantro".to_owned()]);
    let request = GenerateRequest::new("a fragrant thai curry").with_profile(profile);

    let recipe = service.generate_recipe(request).await.unwrap();

    for ingredient in &recipe.ingredients {
        let lower = ingredient.to_lowercase();
        assert!(!lower.contains("peanut"), "allergen leaked: {ingredient}");
        assert!(!lower.contains("cilantro"), "dislike leaked: {ingredient}");
    }
}

#[tokio::test]
async fn test_beginner_skill_caps_recipe_difficulty() {
    let service = mock_service();
    let profile = PreferenceProfile::new().with_skill_level(Difficulty::Easy);
    let request = GenerateRequest::new("a slow-simmered lamb curry").with_profile(profile);

    let recipe = service.generate_recipe(request).await.unwrap();
    assert_eq!(recipe.difficulty, Difficulty::Easy);
}

#[tokio::test]
async fn test_profile_language_is_used_when_the_request_sets_none() {
    let service = mock_service();
    let profile = PreferenceProfile::new().with_preferred_lang(Language::De);
    let request = GenerateRequest::new("eine deftige suppe").with_profile(profile);

    // The mock renders in one language, so the pipeline succeeding at all
    // is the signal here; language routing itself is asserted in unit tests
    let recipe = service.generate_recipe(request).await.unwrap();
    assert!(!recipe.title.is_empty());
}

#[tokio::test]
async fn test_request_text_is_passed_through_without_content_checks() {
    // Free-text validation belongs to the upstream caller; the pipeline
    // forwards whatever it is given and still returns a valid recipe
    let service = mock_service();
    let recipe = service
        .generate_recipe(GenerateRequest::new("   "))
        .await
        .unwrap();
    assert!(!recipe.title.is_empty());
    assert!(!recipe.instructions.is_empty());
}

#[tokio::test]
async fn test_generated_recipe_survives_the_store_and_list_round_trip() {
    let service = mock_service();
    let store = InMemoryRecipeStore::new();

    let recipe = service
        .generate_recipe(GenerateRequest::new("hearty lentil soup").with_lang(Language::En))
        .await
        .unwrap();
    let title = recipe.title.clone();
    store
        .insert(RecipeRecord::new(recipe, Language::En))
        .await
        .unwrap();

    let page = list_recipes(&store, ListQuery::new()).await.unwrap();
    assert_eq!(page.recipes.len(), 1);
    assert_eq!(page.recipes[0].title, title);
    assert_eq!(page.pagination.total_count, 1);
    assert!(!page.pagination.has_more);
    assert!(page.message.is_none());
}
