// SPDX-License-Identifier: MPL-2.0
//! Login form: field validation and the demo credential check.
//!
//! The form is the only place credentials are inspected. [`SessionStore::login`]
//! is invoked only after both fields validate and match the demo account;
//! otherwise the session is left untouched and the caller gets field errors or
//! an error notification.

use crate::notifications::Notification;
use crate::session::{Credentials, SessionStore};
use crate::storage::KeyValueStore;
use chrono::Utc;

/// Username accepted by the demo account.
pub const DEMO_USERNAME: &str = "admin";

/// Password accepted by the demo account.
pub const DEMO_PASSWORD: &str = "admin";

pub const USERNAME_MIN_CHARS: usize = 1;
pub const PASSWORD_MIN_CHARS: usize = 3;
pub const PASSWORD_MAX_CHARS: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

/// A violated rule, identified by its i18n message key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: LoginField,
    pub key: &'static str,
}

/// Raw form input. `None` means the field was never filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// What happened when the form was submitted.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// At least one field failed validation; nothing else ran.
    Invalid(Vec<FieldError>),
    /// Fields were valid but did not match the demo account.
    Rejected(Notification),
    /// The session is now authenticated.
    LoggedIn(Notification),
}

impl LoginOutcome {
    #[must_use]
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            LoginOutcome::Invalid(_) => None,
            LoginOutcome::Rejected(n) | LoginOutcome::LoggedIn(n) => Some(n),
        }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self, LoginOutcome::LoggedIn(_))
    }
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Trims both fields and checks them; returns the cleaned credentials.
    ///
    /// Every field reports at most one error.
    pub fn validate(&self) -> Result<Credentials, Vec<FieldError>> {
        let mut errors = Vec::new();

        let username = self.username.as_deref().map(str::trim);
        match username {
            None => errors.push(FieldError {
                field: LoginField::Username,
                key: "login-username-required",
            }),
            Some(name) if name.chars().count() < USERNAME_MIN_CHARS => errors.push(FieldError {
                field: LoginField::Username,
                key: "login-username-min",
            }),
            Some(_) => {}
        }

        let password = self.password.as_deref().map(str::trim);
        match password.map(|p| (p, p.chars().count())) {
            None => errors.push(FieldError {
                field: LoginField::Password,
                key: "login-password-required",
            }),
            Some((_, len)) if len < PASSWORD_MIN_CHARS => errors.push(FieldError {
                field: LoginField::Password,
                key: "login-password-min",
            }),
            Some((_, len)) if len > PASSWORD_MAX_CHARS => errors.push(FieldError {
                field: LoginField::Password,
                key: "login-password-max",
            }),
            Some(_) => {}
        }

        match (username, password) {
            (Some(username), Some(password)) if errors.is_empty() => {
                Ok(Credentials::new(username, password))
            }
            _ => Err(errors),
        }
    }

    /// Validates, checks the demo account and logs in on a match.
    pub async fn submit<S: KeyValueStore>(
        &self,
        session: &SessionStore<S>,
        token: impl Into<String>,
    ) -> LoginOutcome {
        let credentials = match self.validate() {
            Ok(credentials) => credentials,
            Err(errors) => return LoginOutcome::Invalid(errors),
        };

        if !matches_demo_account(&credentials) {
            tracing::info!(user = %credentials.username, "login rejected");
            return LoginOutcome::Rejected(
                Notification::error("login-toast-error-title")
                    .with_description("login-toast-error-description"),
            );
        }

        session.login(&credentials, token).await;
        LoginOutcome::LoggedIn(
            Notification::success("login-toast-success-title")
                .with_description("login-toast-success-description")
                .with_arg("username", credentials.username),
        )
    }
}

/// Exact comparison against the hardcoded demo account.
#[must_use]
pub fn matches_demo_account(credentials: &Credentials) -> bool {
    credentials.username == DEMO_USERNAME && credentials.password == DEMO_PASSWORD
}

/// Issues an opaque session token for `username`.
#[must_use]
pub fn issue_demo_token(username: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(username.as_bytes());
    hasher.update(Utc::now().to_rfc3339().as_bytes());
    let digest = hasher.finalize().to_hex();
    format!("tok-{}", &digest.as_str()[..32])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionConfig, USER_KEY};
    use crate::storage::MemoryStore;

    fn keys(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.key).collect()
    }

    #[test]
    fn valid_form_returns_trimmed_credentials() {
        let creds = LoginForm::new("  admin ", " admin  ").validate().unwrap();
        assert_eq!(creds, Credentials::new("admin", "admin"));
    }

    #[test]
    fn missing_fields_are_required() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(
            keys(&errors),
            vec!["login-username-required", "login-password-required"]
        );
    }

    #[test]
    fn blank_username_is_too_short() {
        let errors = LoginForm::new("   ", "secret").validate().unwrap_err();
        assert_eq!(keys(&errors), vec!["login-username-min"]);
        assert_eq!(errors[0].field, LoginField::Username);
    }

    #[test]
    fn password_length_bounds() {
        let short = LoginForm::new("user", "ab").validate().unwrap_err();
        assert_eq!(keys(&short), vec!["login-password-min"]);

        let long = LoginForm::new("user", "a".repeat(15)).validate().unwrap_err();
        assert_eq!(keys(&long), vec!["login-password-max"]);

        assert!(LoginForm::new("user", "abc").validate().is_ok());
        assert!(LoginForm::new("user", "a".repeat(14)).validate().is_ok());
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        assert!(LoginForm::new("user", "ééé").validate().is_ok());
    }

    #[test]
    fn demo_account_match_is_exact() {
        assert!(matches_demo_account(&Credentials::new("admin", "admin")));
        assert!(!matches_demo_account(&Credentials::new("Admin", "admin")));
        assert!(!matches_demo_account(&Credentials::new("admin", "admin1")));
    }

    #[tokio::test]
    async fn submit_logs_in_demo_account() {
        let session = SessionStore::new(MemoryStore::new(), SessionConfig::immediate());
        let outcome = LoginForm::new("admin", "admin").submit(&session, "tok-123").await;

        assert!(outcome.is_logged_in());
        let notification = outcome.notification().unwrap();
        assert_eq!(notification.title_key(), "login-toast-success-title");
        assert_eq!(notification.args(), &[("username".to_string(), "admin".to_string())]);

        assert!(session.is_authenticated());
        assert_eq!(session.into_storage().get(USER_KEY).as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn submit_with_wrong_password_never_logs_in() {
        let session = SessionStore::new(MemoryStore::new(), SessionConfig::immediate());
        let outcome = LoginForm::new("admin", "wrong").submit(&session, "tok").await;

        match outcome {
            LoginOutcome::Rejected(n) => assert_eq!(n.title_key(), "login-toast-error-title"),
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(!session.is_authenticated());
        assert!(session.into_storage().is_empty());
    }

    #[tokio::test]
    async fn submit_with_invalid_fields_reports_errors() {
        let session = SessionStore::new(MemoryStore::new(), SessionConfig::immediate());
        let outcome = LoginForm::new("", "x").submit(&session, "tok").await;

        assert!(matches!(outcome, LoginOutcome::Invalid(ref e) if e.len() == 2));
        assert!(outcome.notification().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn demo_tokens_are_opaque_and_prefixed() {
        let token = issue_demo_token("admin");
        assert!(token.starts_with("tok-"));
        assert_eq!(token.len(), 4 + 32);
        assert!(!token.contains("admin"));
    }
}
