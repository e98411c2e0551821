// SPDX-License-Identifier: MPL-2.0
//! Posts payload shape checking.
//!
//! A posts payload is a JSON array of records. Anything that does not match
//! the expected shape is replaced by a localized "not found" placeholder
//! rather than being reported as an error.

use serde::{Deserialize, Serialize};

/// A single post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

impl Post {
    /// Returns the first violated rule, if any.
    fn violation(&self) -> Option<&'static str> {
        if self.title.is_empty() {
            Some("empty title")
        } else if self.description.is_empty() {
            Some("empty description")
        } else if self.body.is_empty() {
            Some("empty body")
        } else {
            None
        }
    }
}

/// Optional filter applied to a posts listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub user_id: Option<u64>,
}

impl PostFilter {
    /// Parses a user id given on the command line, ignoring garbage.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        Self {
            user_id: raw.and_then(|s| s.trim().parse().ok()),
        }
    }

    fn matches(&self, post: &Post) -> bool {
        self.user_id.is_none_or(|id| post.user_id == id)
    }
}

/// Placeholder shown when a payload fails the shape check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderPost {
    pub title_key: &'static str,
    pub body_key: &'static str,
}

pub const NOT_FOUND_PLACEHOLDER: PlaceholderPost = PlaceholderPost {
    title_key: "posts-not-found-title",
    body_key: "posts-not-found-body",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostsOutcome {
    Success(Vec<Post>),
    Error(PlaceholderPost),
}

/// Shape-checks `raw` as a list of posts and applies `filter`.
#[must_use]
pub fn posts_by_user(filter: PostFilter, raw: &str) -> PostsOutcome {
    match validate_posts(raw) {
        Ok(posts) => PostsOutcome::Success(
            posts.into_iter().filter(|post| filter.matches(post)).collect(),
        ),
        Err(reason) => {
            tracing::debug!(%reason, "posts payload rejected");
            PostsOutcome::Error(NOT_FOUND_PLACEHOLDER)
        }
    }
}

fn validate_posts(raw: &str) -> Result<Vec<Post>, String> {
    let posts: Vec<Post> = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    for post in &posts {
        if let Some(key) = post.violation() {
            return Err(format!("post {}: {key}", post.id));
        }
    }
    Ok(posts)
}
