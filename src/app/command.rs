// SPDX-License-Identifier: MPL-2.0
//! Command-line commands understood by [`super::App`].

use crate::error::{Error, Result};
use crate::posts::PostFilter;
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: showcase [--lang LOCALE] [--data-dir DIR] [--config-dir DIR] <COMMAND>

Commands:
  status                        Show whether someone is logged in
  login <USERNAME> <PASSWORD>   Log in (demo account: admin / admin)
  logout                        Log out
  page [home|config|zod]        Print a localized page
  posts <FILE> [--user-id N]    Shape-check a JSON posts payload
  lang <LOCALE>                 Switch and remember the interface language
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status,
    Login { username: String, password: String },
    Logout,
    Page(String),
    Posts { path: PathBuf, filter: PostFilter },
    Lang(String),
}

impl Command {
    /// Parses the subcommand and its arguments. Global flags must already
    /// have been consumed.
    pub fn from_args(args: &mut pico_args::Arguments) -> Result<Self> {
        let Some(name) = args.subcommand()? else {
            return Ok(Command::Status);
        };

        let command = match name.as_str() {
            "status" => Command::Status,
            "login" => Command::Login {
                username: args.free_from_str()?,
                password: args.free_from_str()?,
            },
            "logout" => Command::Logout,
            "page" => Command::Page(
                args.opt_free_from_str()?
                    .unwrap_or_else(|| "home".to_string()),
            ),
            "posts" => {
                let user_id: Option<String> = args.opt_value_from_str("--user-id")?;
                Command::Posts {
                    path: args.free_from_str()?,
                    filter: PostFilter::parse(user_id.as_deref()),
                }
            }
            "lang" => Command::Lang(args.free_from_str()?),
            other => return Err(Error::Usage(format!("unknown command '{other}'"))),
        };
        Ok(command)
    }
}
