// ABOUTME: In-memory reference implementation of the RecipeStore trait
// ABOUTME: RwLock-protected row vector with keyset-aware filtered selects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! # In-Memory Recipe Store
//!
//! Thread-safe reference store backing tests, the bench, and the demo CLI.
//! All access is guarded by a `std::sync::RwLock` with short critical
//! sections and no awaits under the lock; a poisoned lock surfaces as
//! [`StoreError::LockPoisoned`] instead of panicking.

use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use ladle_core::errors::StoreError;
use ladle_core::models::RecipeRecord;
use ladle_core::pagination::SortOrder;

use super::{RecipeFilter, RecipeStore, SelectRequest};

/// In-memory recipe store for tests, benches, and demos
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecipeStore {
    records: Arc<RwLock<Vec<RecipeRecord>>>,
}

impl InMemoryRecipeStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with records (seeding and tests)
    #[must_use]
    pub fn with_records(records: Vec<RecipeRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Number of stored records, ignoring filters
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] when the lock is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().map_err(|_| StoreError::LockPoisoned)?.len())
    }

    /// True when the store holds no records
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] when the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

/// Ascending comparison over the `(created_at, id)` total order
fn position_cmp(a: &RecipeRecord, b: &RecipeRecord) -> Ordering {
    a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id))
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn insert(&self, record: RecipeRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .push(record);
        Ok(())
    }

    async fn select(&self, request: SelectRequest) -> Result<Vec<RecipeRecord>, StoreError> {
        let guard = self.records.read().map_err(|_| StoreError::LockPoisoned)?;

        let mut rows: Vec<RecipeRecord> = guard
            .iter()
            .filter(|record| request.filter.matches(record))
            .filter(|record| match request.keyset {
                // Exclusive tuple comparison: (ts < c_ts) OR (ts = c_ts AND id < c_id),
                // mirrored for ascending order. A per-column AND would wrongly
                // drop same-timestamp rows.
                Some((cursor_ts, cursor_id)) => match request.sort {
                    SortOrder::Recent => {
                        record.created_at < cursor_ts
                            || (record.created_at == cursor_ts && record.id < cursor_id)
                    }
                    SortOrder::Oldest => {
                        record.created_at > cursor_ts
                            || (record.created_at == cursor_ts && record.id > cursor_id)
                    }
                },
                None => true,
            })
            .cloned()
            .collect();

        rows.sort_by(|a, b| match request.sort {
            SortOrder::Recent => position_cmp(b, a),
            SortOrder::Oldest => position_cmp(a, b),
        });

        Ok(rows
            .into_iter()
            .skip(request.offset)
            .take(request.limit)
            .collect())
    }

    async fn count(&self, filter: &RecipeFilter) -> Result<u64, StoreError> {
        let guard = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.iter().filter(|record| filter.matches(record)).count() as u64)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut guard = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        let before = guard.len();
        guard.retain(|record| record.id != id);
        Ok(guard.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use ladle_core::models::{Difficulty, Language, Recipe};

    fn record(title: &str, tags: &[&str], minutes_ago: i64) -> RecipeRecord {
        let recipe = Recipe {
            title: title.to_owned(),
            summary: None,
            description: None,
            prep_time_minutes: 5,
            cook_time_minutes: 10,
            servings: 2,
            difficulty: Difficulty::Easy,
            cuisine: Some("Test".to_owned()),
            ingredients: vec!["one thing".to_owned()],
            instructions: vec!["do the thing".to_owned()],
            tags: tags.iter().map(|s| (*s).to_owned()).collect(),
            dietary_info: std::collections::BTreeMap::new(),
            nutrition: std::collections::BTreeMap::new(),
        };
        RecipeRecord::new(recipe, Language::En)
            .with_created_at(Utc::now() - Duration::minutes(minutes_ago))
    }

    fn select_all(sort: SortOrder) -> SelectRequest {
        SelectRequest {
            filter: RecipeFilter::default(),
            sort,
            keyset: None,
            offset: 0,
            limit: 100,
        }
    }

    #[tokio::test]
    async fn test_insert_select_delete_round_trip() {
        let store = InMemoryRecipeStore::new();
        let rec = record("Toast", &[], 0);
        let id = rec.id;

        store.insert(rec).await.unwrap();
        assert_eq!(store.len().unwrap(), 1);

        let rows = store.select(select_all(SortOrder::Recent)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_recent_orders_newest_first() {
        let store = InMemoryRecipeStore::with_records(vec![
            record("Old", &[], 60),
            record("New", &[], 1),
            record("Middle", &[], 30),
        ]);

        let rows = store.select(select_all(SortOrder::Recent)).await.unwrap();
        let titles: Vec<&str> = rows.iter().map(|r| r.recipe.title.as_str()).collect();
        assert_eq!(titles, ["New", "Middle", "Old"]);

        let rows = store.select(select_all(SortOrder::Oldest)).await.unwrap();
        let titles: Vec<&str> = rows.iter().map(|r| r.recipe.title.as_str()).collect();
        assert_eq!(titles, ["Old", "Middle", "New"]);
    }

    #[tokio::test]
    async fn test_id_breaks_timestamp_ties_deterministically() {
        let ts = Utc::now();
        let a = record("A", &[], 0).with_created_at(ts);
        let b = record("B", &[], 0).with_created_at(ts);
        let store = InMemoryRecipeStore::with_records(vec![a.clone(), b.clone()]);

        let rows = store.select(select_all(SortOrder::Recent)).await.unwrap();
        let expected_first = if a.id > b.id { a.id } else { b.id };
        assert_eq!(rows[0].id, expected_first);
    }

    #[tokio::test]
    async fn test_keyset_excludes_bound_but_keeps_same_timestamp_rows() {
        let ts = Utc::now();
        let mut records: Vec<RecipeRecord> =
            (0..4).map(|_| record("Same", &[], 0).with_created_at(ts)).collect();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        let store = InMemoryRecipeStore::with_records(records.clone());

        // Bound at the second row descending: rows 3 and 4 must still appear
        let bound = (records[1].created_at, records[1].id);
        let rows = store
            .select(SelectRequest {
                filter: RecipeFilter::default(),
                sort: SortOrder::Recent,
                keyset: Some(bound),
                offset: 0,
                limit: 100,
            })
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, records[2].id);
        assert_eq!(rows[1].id, records[3].id);
    }

    #[tokio::test]
    async fn test_tag_filter_is_an_or_over_query_tags() {
        let store = InMemoryRecipeStore::with_records(vec![
            record("Pasta", &["pasta", "quick"], 1),
            record("Soup", &["soup"], 2),
            record("Salad", &["fresh"], 3),
        ]);

        let rows = store
            .select(SelectRequest {
                filter: RecipeFilter {
                    tags: vec!["pasta".to_owned(), "soup".to_owned()],
                    ..RecipeFilter::default()
                },
                sort: SortOrder::Recent,
                keyset: None,
                offset: 0,
                limit: 100,
            })
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let store = InMemoryRecipeStore::with_records(vec![
            record("Tomato Pasta", &[], 1),
            record("Lentil Soup", &[], 2),
        ]);

        let filter = RecipeFilter {
            search: Some("TOMATO".to_owned()),
            ..RecipeFilter::default()
        };
        assert_eq!(store.count(&filter).await.unwrap(), 1);
    }
}
