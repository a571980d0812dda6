// ABOUTME: Demo and inspection CLI for the Ladle recipe core
// ABOUTME: Generates recipes, walks paginated listings, and decodes cursor tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! Ladle command-line tool.
//!
//! `generate` runs the configured backend (the offline mock by default, so
//! no credentials are needed), `list` seeds an in-memory store and walks
//! its pages, and `decode-cursor` inspects an opaque pagination token.

use anyhow::{Context, Result};
use chrono::{Duration as ChronoDuration, Utc};
use clap::{Parser, Subcommand};

use ladle::config::GenerationConfig;
use ladle::llm::{build_recipe_prompt, parse_recipe_response, RecipeBackend};
use ladle::llm::{MockRecipeProvider, RecipeProvider};
use ladle::logging::LoggingConfig;
use ladle::models::{DietType, Difficulty, Language, PreferenceProfile, RecipeRecord};
use ladle::pagination::{Cursor, SortOrder};
use ladle::services::generation::{GenerateRequest, GenerationService};
use ladle::services::listing::{list_recipes, ListQuery};
use ladle::store::{InMemoryRecipeStore, RecipeStore};

#[derive(Parser)]
#[command(name = "ladle-cli", about = "Ladle recipe generation and listing demo", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a recipe from a free-text request
    Generate {
        /// What to cook, e.g. "quick vegan pasta"
        prompt: String,

        /// Dietary requirement (vegan, keto, gluten-free, ...)
        #[arg(long)]
        diet: Option<String>,

        /// Ingredient to avoid; repeatable
        #[arg(long = "avoid")]
        avoided: Vec<String>,

        /// Preferred cuisine; repeatable
        #[arg(long)]
        cuisine: Vec<String>,

        /// Cooking skill capping difficulty (easy, medium, hard)
        #[arg(long)]
        skill: Option<String>,

        /// Output language (en, de, fr, es)
        #[arg(long)]
        lang: Option<String>,
    },

    /// Seed a demo store and walk its pages
    List {
        /// Page size
        #[arg(long, default_value_t = 4)]
        limit: usize,

        /// Sort direction (recent or oldest)
        #[arg(long, default_value = "recent")]
        sort: String,

        /// Tag filter; repeatable, rows matching any tag pass
        #[arg(long)]
        tag: Vec<String>,

        /// Substring search over titles, summaries, and tags
        #[arg(long)]
        search: Option<String>,
    },

    /// Decode an opaque cursor token into its position
    DecodeCursor {
        /// The token to decode
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    LoggingConfig::from_env().init()?;

    match Cli::parse().command {
        Commands::Generate {
            prompt,
            diet,
            avoided,
            cuisine,
            skill,
            lang,
        } => generate(prompt, diet, avoided, cuisine, skill, lang).await,
        Commands::List {
            limit,
            sort,
            tag,
            search,
        } => list(limit, &sort, tag, search).await,
        Commands::DecodeCursor { token } => decode_cursor(token),
    }
}

async fn generate(
    prompt: String,
    diet: Option<String>,
    avoided: Vec<String>,
    cuisine: Vec<String>,
    skill: Option<String>,
    lang: Option<String>,
) -> Result<()> {
    let config = GenerationConfig::from_env()?;
    let backend = RecipeBackend::from_config(&config)?;
    let service = GenerationService::new(backend, config);

    let mut profile = PreferenceProfile::new()
        .with_disliked_ingredients(avoided)
        .with_preferred_cuisines(cuisine);
    if let Some(name) = diet {
        profile = profile.with_diet(
            DietType::parse(&name).with_context(|| format!("unknown diet: {name}"))?,
        );
    }
    if let Some(level) = skill {
        profile = profile.with_skill_level(
            Difficulty::parse(&level).with_context(|| format!("unknown skill level: {level}"))?,
        );
    }

    let mut request = GenerateRequest::new(prompt);
    if !profile.is_empty() {
        request = request.with_profile(profile);
    }
    if let Some(code) = lang {
        request = request.with_lang(Language::from_str_or_default(&code));
    }

    let recipe = service.generate_recipe(request).await?;
    println!("{}", serde_json::to_string_pretty(&recipe)?);
    Ok(())
}

async fn list(
    limit: usize,
    sort: &str,
    tags: Vec<String>,
    search: Option<String>,
) -> Result<()> {
    let store = seed_demo_store().await?;

    let mut query = ListQuery::new()
        .with_limit(limit)
        .with_sort(SortOrder::parse(sort))
        .with_tags(tags);
    if let Some(text) = search {
        query = query.with_search(text);
    }

    let mut page_number = 1;
    loop {
        let page = list_recipes(&store, query.clone()).await?;

        println!(
            "page {page_number} ({} of {} total):",
            page.recipes.len(),
            page.pagination.total_count
        );
        for summary in &page.recipes {
            println!(
                "  {}  [{} | {} min | serves {}]",
                summary.title,
                summary.difficulty.as_str(),
                summary.total_time_minutes,
                summary.servings
            );
        }
        if let Some(message) = &page.message {
            println!("  {message}");
        }

        match page.pagination.next_cursor {
            Some(cursor) if page.pagination.has_more => {
                query = query.with_cursor(cursor.as_str());
                page_number += 1;
            }
            _ => break,
        }
    }
    Ok(())
}

fn decode_cursor(token: String) -> Result<()> {
    let (created_at, id) = Cursor::from_string(token).decode()?;
    println!("created_at: {}", created_at.to_rfc3339());
    println!("id:         {id}");
    Ok(())
}

/// Seed a store from the mock provider's archetypes with staggered timestamps
async fn seed_demo_store() -> Result<InMemoryRecipeStore> {
    let provider = MockRecipeProvider::instant();
    let store = InMemoryRecipeStore::new();

    let prompts = [
        "quick vegan pasta",
        "chickpea salad",
        "smoky lentil soup",
        "coconut curry",
        "pancake breakfast",
        "weeknight dinner",
    ];

    for (idx, text) in prompts.iter().enumerate() {
        let prompt = build_recipe_prompt(text, None, Language::En);
        let raw = provider.generate(&prompt, None, Language::En).await?;
        let recipe = parse_recipe_response(&raw)?;
        let record = RecipeRecord::new(recipe, Language::En)
            .with_created_at(Utc::now() - ChronoDuration::hours(idx as i64));
        store.insert(record).await?;
    }

    Ok(store)
}
