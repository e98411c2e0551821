// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Session**: Simulated round-trip latency for login/logout
//! - **Query Cache**: Capacity and garbage-collection age of resolved content
//! - **Locale**: Fallback language

// ==========================================================================
// Session Defaults
// ==========================================================================

/// Default simulated latency of a login round trip (in milliseconds).
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 500;

/// Default simulated latency of a logout round trip (in milliseconds).
pub const DEFAULT_LOGOUT_DELAY_MS: u64 = 250;

/// Upper bound for configured delays (in milliseconds).
pub const MAX_SIMULATED_DELAY_MS: u64 = 10_000;

// ==========================================================================
// Query Cache Defaults
// ==========================================================================

/// Default number of resolved queries kept in memory.
pub const DEFAULT_QUERY_CACHE_CAPACITY: usize = 64;

/// Minimum query cache capacity.
pub const MIN_QUERY_CACHE_CAPACITY: usize = 1;

/// Maximum query cache capacity.
pub const MAX_QUERY_CACHE_CAPACITY: usize = 4096;

/// Default age (in seconds) after which a cached query is collected.
pub const DEFAULT_QUERY_GC_TIME_SECS: u64 = 300;

// ==========================================================================
// Locale Defaults
// ==========================================================================

/// Locale used when neither CLI, config nor OS provide a supported one.
pub const DEFAULT_LOCALE: &str = "en-US";
