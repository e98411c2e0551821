// SPDX-License-Identifier: MPL-2.0
//! Application shell.
//!
//! [`App`] is built once at startup: it loads the configuration, picks the
//! interface language, hydrates the session from durable storage and sets up
//! the content cache. Commands are then executed against that single
//! instance; dropping it is the teardown.

mod command;
pub mod paths;

pub use command::{Command, USAGE};

use crate::config::{self, Config};
use crate::content::{CacheConfig, ContentClient, MarkdownPage};
use crate::error::Result;
use crate::forms::login::{issue_demo_token, LoginField, LoginForm, LoginOutcome};
use crate::i18n::fluent::I18n;
use crate::notifications::Notification;
use crate::posts::{self, PostsOutcome};
use crate::session::{SessionConfig, SessionStore};
use crate::storage::{FileStore, KeyValueStore};
use fluent_bundle::FluentValue;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

/// Startup options taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    pub lang: Option<String>,
    pub data_dir: Option<String>,
    pub config_dir: Option<String>,
}

/// Result of a command: text lines plus the notifications it raised.
#[derive(Debug, Default)]
pub struct Report {
    pub lines: Vec<String>,
    pub notifications: Vec<Notification>,
}

pub struct App<S: KeyValueStore = FileStore> {
    config: Config,
    config_path: Option<PathBuf>,
    i18n: I18n,
    session: Arc<SessionStore<S>>,
    content: ContentClient,
    startup_notifications: Vec<Notification>,
}

impl App<FileStore> {
    /// Builds the application from disk: settings from the config directory,
    /// session identity from the data directory.
    pub fn new(flags: Flags) -> Result<Self> {
        let config_path = config::default_path(flags.config_dir.map(PathBuf::from));
        let config = config::load_or_default(config_path.as_deref())?;

        let (storage, warning) = FileStore::open_in(flags.data_dir.map(PathBuf::from))?;
        tracing::debug!(path = %storage.path().display(), "opened session storage");

        let mut app = Self::with_storage(config, config_path, flags.lang, storage);
        if let Some(key) = warning {
            app.startup_notifications.push(Notification::warning(key));
        }
        Ok(app)
    }
}

impl<S: KeyValueStore> App<S> {
    /// Builds the application around an explicit storage backend.
    pub fn with_storage(
        config: Config,
        config_path: Option<PathBuf>,
        cli_lang: Option<String>,
        storage: S,
    ) -> Self {
        let i18n = I18n::new(cli_lang, &config);
        let session = Arc::new(SessionStore::new(
            storage,
            SessionConfig::from_config(&config),
        ));
        let content = ContentClient::new(CacheConfig::from_config(&config));
        tracing::info!(locale = %i18n.current_locale(), "application initialized");

        Self {
            config,
            config_path,
            i18n,
            session,
            content,
            startup_notifications: Vec::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore<S>> {
        &self.session
    }

    #[must_use]
    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    #[must_use]
    pub fn content(&self) -> &ContentClient {
        &self.content
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Notifications raised while starting up (e.g. unreadable storage).
    pub fn take_startup_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.startup_notifications)
    }

    /// Executes `command` and returns what should be shown to the user.
    pub async fn run(&mut self, command: Command) -> Result<Report> {
        let mut report = Report::default();
        match command {
            Command::Status => report.lines.push(self.status_line()),
            Command::Login { username, password } => {
                self.login(&username, &password, &mut report).await;
            }
            Command::Logout => self.logout(&mut report).await,
            Command::Page(name) => self.page(&name, &mut report).await?,
            Command::Posts { path, filter } => self.posts(&path, filter, &mut report)?,
            Command::Lang(code) => self.change_language(&code, &mut report)?,
        }
        Ok(report)
    }

    fn status_line(&self) -> String {
        match self.session.user() {
            Some(user) => self
                .i18n
                .tr_with_args("status-authenticated", &[("username", user.into())]),
            None => self.i18n.tr("status-anonymous"),
        }
    }

    async fn login(&self, username: &str, password: &str, report: &mut Report) {
        let form = LoginForm::new(username, password);
        let token = issue_demo_token(username.trim());

        match form.submit(&self.session, token).await {
            LoginOutcome::Invalid(errors) => {
                for error in errors {
                    let label = match error.field {
                        LoginField::Username => self.i18n.tr("login-username-label"),
                        LoginField::Password => self.i18n.tr("login-password-label"),
                    };
                    report
                        .lines
                        .push(format!("{label}: {}", self.i18n.tr(error.key)));
                }
            }
            LoginOutcome::Rejected(notification) | LoginOutcome::LoggedIn(notification) => {
                report.notifications.push(notification);
            }
        }
    }

    async fn logout(&self, report: &mut Report) {
        if !self.session.is_authenticated() {
            report
                .notifications
                .push(Notification::warning("logout-not-authenticated"));
            return;
        }
        self.session.logout().await;
        report.notifications.push(
            Notification::success("logout-success-title")
                .with_description("logout-success-description"),
        );
    }

    async fn page(&self, name: &str, report: &mut Report) -> Result<()> {
        if name == "home" {
            report.lines.extend(self.home_page());
            return Ok(());
        }

        match name.parse::<MarkdownPage>() {
            Ok(page) => {
                let source = self
                    .content
                    .page(&self.i18n.language_code(), page)
                    .await?;
                report.lines.push(source.to_string());
            }
            Err(_) => {
                report.lines.push(self.i18n.tr("not-found-title"));
                report.lines.push(
                    self.i18n
                        .tr_with_args("not-found-description", &[("page", name.into())]),
                );
            }
        }
        Ok(())
    }

    fn home_page(&self) -> Vec<String> {
        let pages = std::iter::once("home")
            .chain(MarkdownPage::ALL.iter().map(|page| page.name()))
            .collect::<Vec<_>>()
            .join(", ");
        vec![
            self.i18n.tr("home-title"),
            self.i18n.tr("home-description1"),
            self.i18n.tr("home-description2"),
            self.i18n.tr_with_args("home-pages", &[("pages", pages.into())]),
            self.i18n.tr("home-footer"),
        ]
    }

    fn posts(&self, path: &Path, filter: posts::PostFilter, report: &mut Report) -> Result<()> {
        let raw = std::fs::read_to_string(path)?;
        match posts::posts_by_user(filter, &raw) {
            PostsOutcome::Success(list) => {
                report.lines.push(
                    self.i18n
                        .tr_with_args("posts-count", &[("count", FluentValue::from(list.len()))]),
                );
                report.lines.extend(
                    list.iter()
                        .map(|post| format!("#{} [{}] {}", post.id, post.user_id, post.title)),
                );
            }
            PostsOutcome::Error(placeholder) => {
                report.lines.push(self.i18n.tr(placeholder.title_key));
                report.lines.push(self.i18n.tr(placeholder.body_key));
            }
        }
        Ok(())
    }

    fn change_language(&mut self, code: &str, report: &mut Report) -> Result<()> {
        let accepted = code
            .parse::<LanguageIdentifier>()
            .is_ok_and(|locale| self.i18n.set_locale(locale));

        if !accepted {
            report.lines.push(
                self.i18n
                    .tr_with_args("language-unsupported", &[("language", code.into())]),
            );
            return Ok(());
        }

        self.config.language = Some(self.i18n.language_code());
        if let Some(path) = &self.config_path {
            config::save_to_path(&self.config, path)?;
        }
        report.notifications.push(
            Notification::info("language-changed").with_arg("language", self.i18n.language_code()),
        );
        Ok(())
    }
}
