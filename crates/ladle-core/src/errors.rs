// ABOUTME: Typed errors for recipe generation, list queries, and storage
// ABOUTME: Carries retry classification so the orchestrator never inspects messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

use thiserror::Error;

use crate::models::MAX_RECIPE_JSON_BYTES;

/// Errors raised by the recipe generation pipeline.
///
/// Every variant carries a fixed retry classification exposed through
/// [`GenerateError::retryable`]. The orchestrator consults only that flag;
/// message text is for humans and logs.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The attempt exceeded its deadline or was cancelled mid-flight.
    #[error("recipe generation timed out")]
    Timeout,

    /// The provider call failed. `status` is the HTTP status when one was
    /// received; transport failures and empty provider responses carry none.
    #[error("provider request failed{}: {detail}", format_status(*status))]
    Provider {
        /// HTTP status code, when the provider produced a response
        status: Option<u16>,
        /// Short human-readable failure detail (never contains credentials)
        detail: String,
    },

    /// The provider responded, but the payload failed parsing or schema
    /// validation. Treated as model flakiness and retried.
    #[error("recipe validation failed: {reason}")]
    Validation {
        /// Description naming the offending field and observed value
        reason: String,
    },

    /// A structurally valid recipe serialized to at or above the hard
    /// ceiling. Never retried: the same prompt would overflow again.
    #[error("recipe serializes to {bytes} bytes, exceeding the {limit} byte limit", limit = MAX_RECIPE_JSON_BYTES)]
    SizeLimit {
        /// Observed serialized size in bytes
        bytes: usize,
    },
}

fn format_status(status: Option<u16>) -> String {
    status.map_or_else(String::new, |code| format!(" with status {code}"))
}

impl GenerateError {
    /// Whether the retry orchestrator may attempt this request again.
    ///
    /// Timeouts, validation failures, statusless provider failures, and
    /// provider statuses >= 500 are transient. 4xx statuses indicate a
    /// request the provider will keep rejecting, and a size-limit error
    /// cannot be fixed by retrying.
    #[must_use]
    pub const fn retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::Validation { .. } => true,
            Self::Provider { status, .. } => match status {
                Some(code) => *code >= 500,
                None => true,
            },
            Self::SizeLimit { .. } => false,
        }
    }

    /// HTTP status reported by the provider, when one exists.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => *status,
            _ => None,
        }
    }

    /// Build a provider error from an optional status and failure detail.
    pub fn provider(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self::Provider {
            status,
            detail: detail.into(),
        }
    }

    /// Build a validation error with a human-readable reason.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

/// Errors raised while planning or executing a list query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The supplied cursor token could not be decoded into a position.
    #[error("invalid cursor: {reason}")]
    InvalidCursor {
        /// Which decoding step failed
        reason: String,
    },

    /// The query parameters themselves are malformed.
    #[error("invalid query: {reason}")]
    InvalidQuery {
        /// Which parameter was rejected and why
        reason: String,
    },

    /// The backing store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl QueryError {
    /// Build an invalid-cursor error.
    pub fn invalid_cursor(reason: impl Into<String>) -> Self {
        Self::InvalidCursor {
            reason: reason.into(),
        }
    }

    /// Build an invalid-query error.
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            reason: reason.into(),
        }
    }
}

/// Errors raised by a recipe store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// The backing engine reported a failure.
    #[error("store backend failed: {message}")]
    Backend {
        /// Engine-specific failure description
        message: String,
    },
}

impl StoreError {
    /// Build a backend error from an engine-specific message.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
