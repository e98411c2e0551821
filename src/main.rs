// SPDX-License-Identifier: MPL-2.0
use showcase::app::{paths, App, Command, Flags, USAGE};
use showcase::error::Error;
use showcase::notifications::Notification;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let (flags, command) = match parse_args(args) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    let mut app = match App::new(flags) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    for notification in app.take_startup_notifications() {
        print_notification(&app, &notification);
    }

    match app.run(command).await {
        Ok(report) => {
            for line in &report.lines {
                println!("{line}");
            }
            for notification in &report.notifications {
                print_notification(&app, notification);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("{}", localized_error(&app, &err));
            ExitCode::FAILURE
        }
    }
}

fn parse_args(mut args: pico_args::Arguments) -> Result<(Flags, Command), Error> {
    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
    };
    let command = Command::from_args(&mut args)?;

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(Error::Usage(format!("unexpected arguments: {rest:?}")));
    }
    Ok((flags, command))
}

fn print_notification<S: showcase::storage::KeyValueStore>(
    app: &App<S>,
    notification: &Notification,
) {
    let (title, description) = notification.render(app.i18n());
    let tag = notification.severity().label();
    match description {
        Some(description) => println!("[{tag}] {title} {description}"),
        None => println!("[{tag}] {title}"),
    }
}

fn localized_error<S: showcase::storage::KeyValueStore>(app: &App<S>, err: &Error) -> String {
    let details = match err {
        Error::Io(d) | Error::Config(d) | Error::State(d) | Error::Content(d) | Error::Usage(d) => {
            d.clone()
        }
    };
    app.i18n()
        .tr_with_args(err.i18n_key(), &[("details", details.into())])
}
