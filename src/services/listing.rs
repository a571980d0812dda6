// ABOUTME: Query planner for keyset-paginated recipe listing
// ABOUTME: Validates filters, decodes cursors, probes limit+1, and derives page metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! # Listing Service
//!
//! Plans and runs list queries against a [`RecipeStore`]. Ordering is the
//! total order `(created_at, id)` — the id tie-breaker keeps pages
//! deterministic when timestamps collide. Cursor pagination fetches
//! `limit + 1` rows to probe for a next page; the next cursor is derived
//! from the last row of the truncated page, never the probe row. Offset
//! pagination skips the cursor steps entirely; the two modes are mutually
//! exclusive per request.
//!
//! Pages are weakly consistent snapshots: `total_count` and the rows may
//! come from different lock acquisitions, and concurrent writers can shift
//! later pages. That tradeoff is accepted and documented, not a defect.

use tracing::{debug, instrument};

use ladle_core::errors::QueryError;
use ladle_core::models::{Language, RecipeSummary};
use ladle_core::pagination::{Cursor, PageInfo, RecipePage, SortOrder};

use crate::store::{RecipeFilter, RecipeStore, SelectRequest};

/// Smallest accepted page size
pub const MIN_LIMIT: usize = 1;
/// Largest accepted page size
pub const MAX_LIMIT: usize = 100;
/// Page size when the query names none
pub const DEFAULT_LIMIT: usize = 20;
/// Longest accepted search text, in characters
pub const MAX_SEARCH_CHARS: usize = 200;

/// One recipe list query
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// Case-insensitive substring search (up to 200 characters)
    pub search: Option<String>,

    /// OR-tag filter: rows carrying any of these tags match
    pub tags: Vec<String>,

    /// Language equality filter
    pub lang: Option<Language>,

    /// Sort direction over `(created_at, id)`
    pub sort: SortOrder,

    /// Page size (1-100)
    pub limit: usize,

    /// Opaque cursor token from a previous page; exclusive with `offset`
    pub cursor: Option<String>,

    /// Positional offset; exclusive with `cursor`
    pub offset: Option<usize>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            tags: Vec::new(),
            lang: None,
            sort: SortOrder::default(),
            limit: DEFAULT_LIMIT,
            cursor: None,
            offset: None,
        }
    }
}

impl ListQuery {
    /// Create a query with defaults (recent sort, limit 20, no filters)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Set the OR-tag filter
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the language filter
    #[must_use]
    pub const fn with_lang(mut self, lang: Language) -> Self {
        self.lang = Some(lang);
        self
    }

    /// Set the sort direction
    #[must_use]
    pub const fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Set the page size
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Continue from a cursor token
    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Use positional offset pagination instead of cursors
    #[must_use]
    pub const fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Reject malformed parameters before touching the store
    fn validate(&self) -> Result<(), QueryError> {
        if self.limit < MIN_LIMIT || self.limit > MAX_LIMIT {
            return Err(QueryError::invalid_query(format!(
                "limit must be between {MIN_LIMIT} and {MAX_LIMIT}, got {}",
                self.limit
            )));
        }

        if let Some(search) = &self.search {
            let count = search.chars().count();
            if count > MAX_SEARCH_CHARS {
                return Err(QueryError::invalid_query(format!(
                    "search text must be at most {MAX_SEARCH_CHARS} characters, got {count}"
                )));
            }
        }

        if self.cursor.is_some() && self.offset.is_some() {
            return Err(QueryError::invalid_query(
                "cursor and offset are mutually exclusive",
            ));
        }

        Ok(())
    }

    fn filter(&self) -> RecipeFilter {
        RecipeFilter {
            search: self.search.clone(),
            tags: self.tags.clone(),
            lang: self.lang,
        }
    }
}

/// Run a list query against the store.
///
/// # Errors
///
/// Returns [`QueryError::InvalidQuery`] for out-of-range parameters or
/// simultaneous cursor/offset, [`QueryError::InvalidCursor`] for a
/// malformed cursor token, and [`QueryError::Store`] when the store fails.
/// None of these are retried here.
#[instrument(skip(store, query), fields(sort = query.sort.as_str(), limit = query.limit))]
pub async fn list_recipes(
    store: &dyn RecipeStore,
    query: ListQuery,
) -> Result<RecipePage, QueryError> {
    query.validate()?;

    let keyset = match &query.cursor {
        Some(token) => Some(Cursor::from_string(token.clone()).decode()?),
        None => None,
    };
    let offset_mode = query.offset.is_some();

    let filter = query.filter();
    let mut rows = store
        .select(SelectRequest {
            filter: filter.clone(),
            sort: query.sort,
            keyset,
            offset: query.offset.unwrap_or(0),
            // Probe one past the page to learn whether more rows exist
            limit: query.limit + 1,
        })
        .await?;

    let has_more = rows.len() > query.limit;
    rows.truncate(query.limit);

    // The next cursor points at the last row the caller actually received
    let next_cursor = if has_more && !offset_mode {
        rows.last().map(|row| Cursor::new(row.created_at, row.id))
    } else {
        None
    };

    let total_count = store.count(&filter).await?;

    let message = if rows.is_empty() {
        let any_records = store.count(&RecipeFilter::default()).await? > 0;
        Some(if any_records {
            "No recipes matched your filters.".to_owned()
        } else {
            "No recipes have been saved yet.".to_owned()
        })
    } else {
        None
    };

    debug!(
        rows = rows.len(),
        has_more, total_count, "list query planned and executed"
    );

    Ok(RecipePage {
        recipes: rows.iter().map(RecipeSummary::from).collect(),
        pagination: PageInfo {
            limit: query.limit,
            next_cursor,
            has_more,
            total_count,
        },
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_bounds_rejected_not_clamped() {
        assert!(ListQuery::new().with_limit(0).validate().is_err());
        assert!(ListQuery::new().with_limit(101).validate().is_err());
        assert!(ListQuery::new().with_limit(1).validate().is_ok());
        assert!(ListQuery::new().with_limit(100).validate().is_ok());
    }

    #[test]
    fn test_overlong_search_rejected() {
        let query = ListQuery::new().with_search("x".repeat(201));
        let err = query.validate().unwrap_err();
        assert!(matches!(err, QueryError::InvalidQuery { .. }));

        // 200 multibyte characters is exactly at the limit
        assert!(ListQuery::new().with_search("é".repeat(200)).validate().is_ok());
    }

    #[test]
    fn test_cursor_and_offset_are_mutually_exclusive() {
        let query = ListQuery::new().with_cursor("abc").with_offset(10);
        let err = query.validate().unwrap_err();
        assert!(err.to_string().contains("mutually exclusive"));
    }
}
