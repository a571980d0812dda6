// ABOUTME: Main library entry point for the Ladle recipe platform
// ABOUTME: AI-assisted recipe generation plus keyset-paginated recipe listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

#![deny(unsafe_code)]

//! # Ladle
//!
//! The core of a recipe-centric application: AI-assisted recipe generation
//! and cursor-paginated recipe listing. HTTP routing, authentication, and
//! the production data store are external collaborators; this crate owns
//! prompt construction, provider adapters, response validation, retry
//! orchestration, the opaque cursor codec, and the list query planner.
//!
//! ## Architecture
//!
//! - **llm**: provider trait, the OpenAI/Gemini network adapters, the
//!   offline mock, the prompt builder, and the response parser
//! - **services**: the generation retry orchestrator and the list planner
//! - **store**: the `RecipeStore` seam plus an in-memory implementation
//! - **config** / **logging**: environment-driven setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ladle::config::GenerationConfig;
//! use ladle::llm::RecipeBackend;
//! use ladle::services::generation::{GenerateRequest, GenerationService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = GenerationConfig::from_env()?;
//!     let backend = RecipeBackend::from_config(&config)?;
//!     let service = GenerationService::new(backend, config);
//!
//!     let recipe = service
//!         .generate_recipe(GenerateRequest::new("quick vegan pasta"))
//!         .await?;
//!     println!("{}", recipe.title);
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// AI provider adapters, prompt builder, and response parsing
pub mod llm;

/// Tracing subscriber setup
pub mod logging;

/// Generation orchestration and list query planning
pub mod services;

/// Recipe storage seam and in-memory implementation
pub mod store;

pub use ladle_core::{errors, models, pagination};
