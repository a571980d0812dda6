// ABOUTME: Service layer for the Ladle recipe platform
// ABOUTME: Generation retry orchestration and list query planning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

//! # Services
//!
//! The two caller-facing operations live here: recipe generation with
//! timeout, retry, and backoff ([`generation`]) and keyset-paginated
//! listing ([`listing`]). Both are stateless apart from injected
//! configuration and are safe to share across concurrent requests.

/// Generation retry orchestrator
pub mod generation;

/// List query planner
pub mod listing;
