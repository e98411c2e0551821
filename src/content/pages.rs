// SPDX-License-Identifier: MPL-2.0
//! Embedded markdown pages.
//!
//! Every page ships as `assets/pages/<locale>/<name>.md` for both supported
//! locales and is handed to the resolver as a [`LocaleContent`] pair.

use super::LocaleContent;
use crate::error::{Error, Result};
use rust_embed::RustEmbed;
use std::fmt;
use std::str::FromStr;

#[derive(RustEmbed)]
#[folder = "assets/pages/"]
struct PageAsset;

const EN_DIR: &str = "en-US";
const PT_BR_DIR: &str = "pt-BR";

/// Static markdown documents bundled with the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkdownPage {
    Config,
    Zod,
}

impl MarkdownPage {
    pub const ALL: [MarkdownPage; 2] = [MarkdownPage::Config, MarkdownPage::Zod];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MarkdownPage::Config => "config",
            MarkdownPage::Zod => "zod",
        }
    }

    /// Loads both locale variants of the page.
    pub fn load(self) -> Result<LocaleContent> {
        Ok(LocaleContent::new(
            read_asset(EN_DIR, self.name())?,
            read_asset(PT_BR_DIR, self.name())?,
        ))
    }
}

fn read_asset(locale_dir: &str, name: &str) -> Result<String> {
    let path = format!("{locale_dir}/{name}.md");
    let file = PageAsset::get(&path)
        .ok_or_else(|| Error::Content(format!("missing page asset {path}")))?;
    String::from_utf8(file.data.into_owned())
        .map_err(|err| Error::Content(format!("{path}: {err}")))
}

impl fmt::Display for MarkdownPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MarkdownPage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MarkdownPage::ALL
            .into_iter()
            .find(|page| page.name() == s)
            .ok_or_else(|| Error::Usage(format!("unknown page '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_has_both_variants() {
        for page in MarkdownPage::ALL {
            let content = page.load().expect("page should load");
            assert!(!content.en().trim().is_empty(), "{page} en is empty");
            assert!(!content.pt_br().trim().is_empty(), "{page} pt-BR is empty");
            assert_ne!(content.en(), content.pt_br(), "{page} is not translated");
        }
    }

    #[test]
    fn parse_round_trips_names() {
        for page in MarkdownPage::ALL {
            assert_eq!(page.name().parse::<MarkdownPage>().unwrap(), page);
        }
        assert!("nope".parse::<MarkdownPage>().is_err());
    }
}
