// SPDX-License-Identifier: MPL-2.0
use showcase::app::{App, Command, Flags};
use showcase::config::{self, Config};
use showcase::i18n::fluent::I18n;
use showcase::session::{Credentials, SessionConfig, SessionStore, TOKEN_KEY, USER_KEY};
use showcase::storage::{FileStore, KeyValueStore};
use std::path::Path;
use tempfile::tempdir;

fn instant_config() -> Config {
    Config {
        login_delay_ms: Some(0),
        logout_delay_ms: Some(0),
        ..Config::default()
    }
}

fn flags(config_dir: &Path, data_dir: &Path) -> Flags {
    Flags {
        lang: Some("en-US".to_string()),
        data_dir: Some(data_dir.to_string_lossy().into_owned()),
        config_dir: Some(config_dir.to_string_lossy().into_owned()),
    }
}

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    let initial_config = Config {
        language: Some("en-US".to_string()),
        ..Config::default()
    };
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");
    let loaded_initial_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    let i18n_en = I18n::new(None, &loaded_initial_config);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");

    let portuguese_config = Config {
        language: Some("pt-BR".to_string()),
        ..Config::default()
    };
    config::save_to_path(&portuguese_config, &temp_config_file_path)
        .expect("Failed to write portuguese config file");
    let loaded_portuguese_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load portuguese config from path");
    let i18n_pt = I18n::new(None, &loaded_portuguese_config);
    assert_eq!(i18n_pt.current_locale().to_string(), "pt-BR");

    dir.close().expect("Failed to close temporary directory");
}

#[tokio::test]
async fn admin_login_is_persisted_to_durable_storage() {
    let dir = tempdir().expect("create temp dir");
    let (storage, _) = FileStore::open_in(Some(dir.path().to_path_buf())).expect("open store");
    let session = SessionStore::new(storage, SessionConfig::immediate());

    session
        .login(&Credentials::new("admin", "admin"), "tok-123")
        .await;
    assert!(session.is_authenticated());
    drop(session);

    let (reopened, warning) =
        FileStore::open_in(Some(dir.path().to_path_buf())).expect("reopen store");
    assert!(warning.is_none());
    assert_eq!(reopened.get(USER_KEY).as_deref(), Some("admin"));
    assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("tok-123"));
}

#[tokio::test]
async fn session_survives_restart_until_logout() {
    let config_dir = tempdir().expect("create config dir");
    let data_dir = tempdir().expect("create data dir");
    config::save_to_path(&instant_config(), &config_dir.path().join("settings.toml"))
        .expect("write config");

    {
        let mut app = App::new(flags(config_dir.path(), data_dir.path())).expect("start app");
        let report = app
            .run(Command::Login {
                username: "admin".into(),
                password: "admin".into(),
            })
            .await
            .expect("login");
        assert_eq!(
            report.notifications[0].title_key(),
            "login-toast-success-title"
        );
    }

    {
        let mut app = App::new(flags(config_dir.path(), data_dir.path())).expect("restart app");
        assert!(app.session().is_authenticated());
        assert_eq!(app.session().user().as_deref(), Some("admin"));
        app.run(Command::Logout).await.expect("logout");
    }

    let app = App::new(flags(config_dir.path(), data_dir.path())).expect("restart app again");
    assert!(!app.session().is_authenticated());
    assert!(app.session().token().is_none());
}

#[tokio::test]
async fn rejected_login_leaves_storage_untouched() {
    let config_dir = tempdir().expect("create config dir");
    let data_dir = tempdir().expect("create data dir");
    config::save_to_path(&instant_config(), &config_dir.path().join("settings.toml"))
        .expect("write config");

    let mut app = App::new(flags(config_dir.path(), data_dir.path())).expect("start app");
    let report = app
        .run(Command::Login {
            username: "admin".into(),
            password: "letmein".into(),
        })
        .await
        .expect("login attempt");

    assert_eq!(report.notifications[0].title_key(), "login-toast-error-title");
    assert!(!app.session().is_authenticated());
    assert!(!data_dir.path().join("storage.cbor").exists());
}

#[tokio::test]
async fn language_switch_is_remembered() {
    let config_dir = tempdir().expect("create config dir");
    let data_dir = tempdir().expect("create data dir");
    let mut startup = flags(config_dir.path(), data_dir.path());
    startup.lang = None;

    let mut app = App::new(startup.clone()).expect("start app");
    app.run(Command::Lang("pt-BR".into())).await.expect("switch language");

    let saved = config::load_from_path(&config_dir.path().join("settings.toml"))
        .expect("settings written");
    assert_eq!(saved.language.as_deref(), Some("pt-BR"));

    let app = App::new(startup).expect("restart app");
    assert_eq!(app.i18n().language_code(), "pt-BR");
}

#[tokio::test]
async fn posts_command_rejects_markdown_payload() {
    let config_dir = tempdir().expect("create config dir");
    let data_dir = tempdir().expect("create data dir");
    let payload = data_dir.path().join("config.md");
    std::fs::write(&payload, "# Configuration\n").expect("write payload");

    let mut app = App::new(flags(config_dir.path(), data_dir.path())).expect("start app");
    let report = app
        .run(Command::Posts {
            path: payload,
            filter: Default::default(),
        })
        .await
        .expect("posts");
    assert_eq!(report.lines[0], "Not found");
}

#[tokio::test]
async fn posts_command_propagates_missing_file() {
    let config_dir = tempdir().expect("create config dir");
    let data_dir = tempdir().expect("create data dir");

    let mut app = App::new(flags(config_dir.path(), data_dir.path())).expect("start app");
    let result = app
        .run(Command::Posts {
            path: data_dir.path().join("absent.json"),
            filter: Default::default(),
        })
        .await;
    assert!(matches!(result, Err(showcase::error::Error::Io(_))));
}

#[tokio::test]
async fn unwritable_storage_keeps_session_in_memory() {
    let dir = tempdir().expect("create temp dir");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "regular file").expect("write blocker");
    let storage_path = blocker.join("storage.cbor");

    let (storage, warning) = FileStore::open_at(storage_path.clone());
    assert!(warning.is_none());
    let session = SessionStore::new(storage, SessionConfig::immediate());

    session
        .login(&Credentials::new("admin", "admin"), "tok-123")
        .await;
    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some("tok-123"));

    let storage = session.into_storage();
    assert_eq!(storage.get(USER_KEY).as_deref(), Some("admin"));
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-123"));
    assert!(!storage_path.exists());
}
