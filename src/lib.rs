// SPDX-License-Identifier: MPL-2.0
//! `showcase` is the core of a small internationalized demo application.
//!
//! It provides a session store persisted to durable key/value storage,
//! localized page resolution behind a deduplicating request cache, login form
//! validation, and Fluent-based translations for English and Brazilian
//! Portuguese.

pub mod app;
pub mod config;
pub mod content;
pub mod error;
pub mod forms;
pub mod i18n;
pub mod notifications;
pub mod posts;
pub mod session;
pub mod storage;
