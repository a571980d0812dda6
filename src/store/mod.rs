// ABOUTME: Storage seam for recipe records consumed by the query planner
// ABOUTME: Defines the RecipeStore trait, filters, and the select request shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! # Recipe Store
//!
//! The query planner talks to storage exclusively through [`RecipeStore`]:
//! row insert, filtered/ordered select, filtered count, and delete. The
//! production store is an external collaborator implementing this trait;
//! [`InMemoryRecipeStore`] is the in-tree reference used by tests, the
//! bench, and the demo CLI.

mod memory;

pub use memory::InMemoryRecipeStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use ladle_core::errors::StoreError;
use ladle_core::models::{Language, RecipeRecord};
use ladle_core::pagination::SortOrder;

/// Row filters a select or count applies before ordering and pagination
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Case-insensitive substring match over title, summary, description,
    /// cuisine, and tags
    pub search: Option<String>,

    /// OR-filter: a row matches when it carries any of these tags exactly
    pub tags: Vec<String>,

    /// Language equality filter
    pub lang: Option<Language>,
}

impl RecipeFilter {
    /// True when no filter is set (the query sees every row)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.tags.is_empty() && self.lang.is_none()
    }

    /// Whether a record passes every set filter
    #[must_use]
    pub fn matches(&self, record: &RecipeRecord) -> bool {
        if let Some(lang) = self.lang {
            if record.lang != lang {
                return false;
            }
        }

        if !self.tags.is_empty()
            && !self.tags.iter().any(|tag| record.recipe.tags.contains(tag))
        {
            return false;
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let recipe = &record.recipe;
            let in_field = |field: Option<&String>| {
                field.is_some_and(|text| text.to_lowercase().contains(&needle))
            };

            let hit = recipe.title.to_lowercase().contains(&needle)
                || in_field(recipe.summary.as_ref())
                || in_field(recipe.description.as_ref())
                || in_field(recipe.cuisine.as_ref())
                || recipe.tags.iter().any(|tag| tag.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        true
    }
}

/// A filtered, ordered, paginated row selection.
///
/// The keyset bound, when present, is exclusive in the direction of the
/// sort: `Recent` returns rows strictly before the bound in
/// `(created_at, id)` descending order, `Oldest` strictly after it
/// ascending. `offset` rows are skipped after filtering and ordering,
/// before `limit` applies.
#[derive(Debug, Clone)]
pub struct SelectRequest {
    /// Row filters
    pub filter: RecipeFilter,

    /// Ordering over the `(created_at, id)` total order
    pub sort: SortOrder,

    /// Exclusive keyset bound from a decoded cursor
    pub keyset: Option<(DateTime<Utc>, Uuid)>,

    /// Positional offset (offset pagination mode)
    pub offset: usize,

    /// Maximum rows returned
    pub limit: usize,
}

/// Storage contract consumed by the query planner.
///
/// Implementations must order rows by the `(created_at, id)` tuple — the
/// id tie-breaker keeps the order strict when timestamps collide — and
/// must apply the keyset bound as a tuple comparison, never as a plain
/// per-column `AND`.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Insert a record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing store rejects the write.
    async fn insert(&self, record: RecipeRecord) -> Result<(), StoreError>;

    /// Select rows per the request, in request order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing store fails.
    async fn select(&self, request: SelectRequest) -> Result<Vec<RecipeRecord>, StoreError>;

    /// Count rows matching the filter, ignoring pagination.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing store fails.
    async fn count(&self, filter: &RecipeFilter) -> Result<u64, StoreError>;

    /// Delete a record by id, reporting whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing store fails.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
