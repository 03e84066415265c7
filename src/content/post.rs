//! Post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Title given to posts whose metadata could not be decoded
pub const INVALID_POST_TITLE: &str = "Invalid Post";

/// Where a post was loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostSource {
    /// Paginated local content store
    Local,
    /// Remote repository listing
    Remote,
}

impl fmt::Display for PostSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostSource::Local => f.write_str("local"),
            PostSource::Remote => f.write_str("remote"),
        }
    }
}

/// A normalized blog post
///
/// View counts are deliberately absent; they live in the
/// [`ViewCounter`](crate::views::ViewCounter) keyed by `slug`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date (unresolvable dates are coerced to load time)
    pub date: DateTime<Utc>,

    /// Post tags, de-duplicated
    pub tags: Vec<String>,

    /// Cover image URL
    pub cover: String,

    /// Author name
    pub author: String,

    /// Raw markdown body
    pub content: String,

    /// Markdown-stripped preview
    pub excerpt: String,

    /// Identifier, unique within its source
    pub slug: String,

    /// Origin of the post
    pub source: PostSource,

    /// Browsable URL of the file (remote posts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,

    /// Estimated reading time in minutes
    pub reading_time: u32,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(title: String, date: DateTime<Utc>, slug: String, source: PostSource) -> Self {
        Self {
            title,
            date,
            tags: Vec::new(),
            cover: String::new(),
            author: String::new(),
            content: String::new(),
            excerpt: String::new(),
            slug,
            source,
            repo_url: None,
            reading_time: 1,
        }
    }

    /// Placeholder returned when a file's metadata cannot be parsed
    pub fn invalid(slug: String, source: PostSource) -> Self {
        let mut post = Self::new(INVALID_POST_TITLE.to_string(), Utc::now(), slug, source);
        post.reading_time = 0;
        post
    }

    /// Whether this post is the parse-failure placeholder
    pub fn is_invalid(&self) -> bool {
        self.reading_time == 0 && self.title == INVALID_POST_TITLE
    }

    /// Case-insensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_placeholder() {
        let post = Post::invalid("broken".to_string(), PostSource::Remote);
        assert_eq!(post.title, "Invalid Post");
        assert_eq!(post.reading_time, 0);
        assert!(post.tags.is_empty());
        assert!(post.excerpt.is_empty());
        assert!(post.is_invalid());
    }

    #[test]
    fn test_has_tag_ignores_case() {
        let mut post = Post::new("T".into(), Utc::now(), "t".into(), PostSource::Local);
        post.tags = vec!["Rust".to_string(), "Äpfel".to_string()];
        assert!(post.has_tag("rust"));
        assert!(post.has_tag("äpfel"));
        assert!(!post.has_tag("go"));
    }

    #[test]
    fn test_source_serializes_lowercase() {
        let json = serde_json::to_string(&PostSource::Remote).unwrap();
        assert_eq!(json, "\"remote\"");
    }
}
