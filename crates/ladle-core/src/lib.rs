// ABOUTME: Core types for the Ladle recipe platform
// ABOUTME: Foundation crate with recipe models, error types, and cursor pagination
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

#![deny(unsafe_code)]

//! # Ladle Core
//!
//! Foundation crate providing shared types for the Ladle recipe platform.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Typed errors for generation, listing, and storage with retry classification
//! - **models**: Recipe, preference profile, and language types
//! - **pagination**: Opaque cursor codec and page metadata for keyset pagination

/// Typed error handling with retry classification
pub mod errors;

/// Core data models (`Recipe`, `PreferenceProfile`, `Language`, etc.)
pub mod models;

/// Opaque cursor codec and page metadata for keyset pagination
pub mod pagination;
