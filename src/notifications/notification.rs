// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct and `Severity` enum
//! used to report outcomes (login success, invalid credentials, storage
//! warnings) back to the user.

use crate::i18n::fluent::I18n;
use fluent_bundle::FluentValue;
use std::time::Duration;

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level determines display duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed successfully (3s duration).
    #[default]
    Success,
    /// Informational message (3s duration).
    Info,
    /// Warning that doesn't block operation (5s duration).
    Warning,
    /// Error requiring attention (manual dismiss).
    Error,
}

impl Severity {
    /// Returns the auto-dismiss duration for this severity.
    /// Returns `None` for errors (manual dismiss required).
    #[must_use]
    pub fn auto_dismiss_duration(&self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }

    /// Short tag used when printing to a terminal.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Success => "ok",
            Severity::Info => "info",
            Severity::Warning => "warn",
            Severity::Error => "error",
        }
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    /// The i18n key for the headline.
    title_key: String,
    /// Optional i18n key for the body text.
    description_key: Option<String>,
    /// Arguments shared by title and description interpolation.
    args: Vec<(String, String)>,
}

impl Notification {
    /// Creates a new notification with the given severity and title key.
    pub fn new(severity: Severity, title_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            title_key: title_key.into(),
            description_key: None,
            args: Vec::new(),
        }
    }

    pub fn success(title_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, title_key)
    }

    pub fn info(title_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, title_key)
    }

    pub fn warning(title_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title_key)
    }

    pub fn error(title_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, title_key)
    }

    /// Attaches a description key.
    #[must_use]
    pub fn with_description(mut self, description_key: impl Into<String>) -> Self {
        self.description_key = Some(description_key.into());
        self
    }

    /// Adds an interpolation argument.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn title_key(&self) -> &str {
        &self.title_key
    }

    #[must_use]
    pub fn args(&self) -> &[(String, String)] {
        &self.args
    }

    /// Resolves title and description through `i18n`.
    #[must_use]
    pub fn render(&self, i18n: &I18n) -> (String, Option<String>) {
        let args: Vec<(&str, FluentValue<'_>)> = self
            .args
            .iter()
            .map(|(name, value)| (name.as_str(), FluentValue::from(value.as_str())))
            .collect();
        let title = i18n.tr_with_args(&self.title_key, &args);
        let description = self
            .description_key
            .as_deref()
            .map(|key| i18n.tr_with_args(key, &args));
        (title, description)
    }
}
