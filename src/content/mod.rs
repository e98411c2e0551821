// SPDX-License-Identifier: MPL-2.0
//! Localized content resolution.
//!
//! Static documents ship in two variants (English and Brazilian Portuguese).
//! [`resolve`] picks the variant for a language code and [`ContentClient`]
//! memoizes that choice through a [`QueryCache`] so repeated navigation to the
//! same page does not resolve it again.

pub mod cache;
pub mod pages;

pub use cache::{CacheConfig, CacheStats, QueryCache};
pub use pages::MarkdownPage;

use crate::error::Result;
use std::sync::Arc;

/// Language code selecting the Brazilian Portuguese variant.
pub const PT_BR: &str = "pt-BR";

/// Query topic used for localized documents.
pub const POSTS_TOPIC: &str = "posts";

/// The two pre-loaded variants of a static document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleContent {
    en: String,
    pt_br: String,
}

impl LocaleContent {
    pub fn new(en: impl Into<String>, pt_br: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            pt_br: pt_br.into(),
        }
    }

    #[must_use]
    pub fn en(&self) -> &str {
        &self.en
    }

    #[must_use]
    pub fn pt_br(&self) -> &str {
        &self.pt_br
    }
}

/// Returns the variant of `content` matching `language`.
///
/// Only the exact code `pt-BR` selects Portuguese; every other value,
/// including unknown codes, falls back to English.
#[must_use]
pub fn resolve<'a>(language: &str, content: &'a LocaleContent) -> &'a str {
    if language == PT_BR {
        content.pt_br()
    } else {
        content.en()
    }
}

/// Cache key of a content request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey {
    pub topic: &'static str,
    pub language: String,
    pub content: Arc<LocaleContent>,
}

/// Resolves localized content through a shared request cache.
pub struct ContentClient {
    cache: QueryCache<ContentKey, Arc<str>>,
}

impl ContentClient {
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            cache: QueryCache::new(config),
        }
    }

    /// Returns the variant of `content` for `language`, resolving it at most
    /// once per `(language, content)` while the entry stays cached.
    pub async fn posts(&self, language: &str, content: Arc<LocaleContent>) -> Arc<str> {
        let key = ContentKey {
            topic: POSTS_TOPIC,
            language: language.to_string(),
            content,
        };
        let language = key.language.clone();
        let content = Arc::clone(&key.content);
        self.cache
            .fetch(key, || async move { fetch_posts(&language, &content) })
            .await
    }

    /// Loads an embedded markdown page and resolves it for `language`.
    pub async fn page(&self, language: &str, page: MarkdownPage) -> Result<Arc<str>> {
        let content = Arc::new(page.load()?);
        Ok(self.posts(language, content).await)
    }

    /// Drops the cached resolution of `(language, content)`.
    pub fn invalidate(&self, language: &str, content: Arc<LocaleContent>) -> bool {
        self.cache.invalidate(&ContentKey {
            topic: POSTS_TOPIC,
            language: language.to_string(),
            content,
        })
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl Default for ContentClient {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

fn fetch_posts(language: &str, content: &LocaleContent) -> Arc<str> {
    tracing::debug!(language, "resolving localized content");
    Arc::from(resolve(language, content))
}
