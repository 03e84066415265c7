//! Content module - turns raw markdown files into normalized posts

mod frontmatter;
pub mod markdown;
mod post;

pub use frontmatter::{parse_date, FrontMatter};
pub use post::{Post, PostSource, INVALID_POST_TITLE};

use chrono::Utc;

use crate::error::SourceError;

/// Title used when a post's metadata has none
pub const DEFAULT_TITLE: &str = "Untitled";

/// Parses front-matter + body blobs into [`Post`] records
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    words_per_minute: u32,
}

impl Normalizer {
    /// Create a normalizer with the given reading speed
    pub fn new(words_per_minute: u32) -> Self {
        Self { words_per_minute }
    }

    /// Parse a markdown file into a post.
    ///
    /// Never fails: metadata that cannot be decoded yields the
    /// [`Post::invalid`] placeholder.
    pub fn parse(&self, text: &str, slug: &str, source: PostSource) -> Post {
        match self.try_parse(text, slug, source) {
            Ok(post) => post,
            Err(e) => {
                tracing::warn!("Invalid post {} ({}): {}", slug, source, e);
                Post::invalid(slug.to_string(), source)
            }
        }
    }

    /// Parse a markdown file, surfacing metadata errors
    pub fn try_parse(
        &self,
        text: &str,
        slug: &str,
        source: PostSource,
    ) -> Result<Post, SourceError> {
        let (fm, body) = FrontMatter::parse(text)?;
        let body = body.trim();

        let date = match fm.date.as_deref() {
            Some(raw) => parse_date(raw).unwrap_or_else(|| {
                tracing::warn!("Unparseable date {:?} in {}, using current time", raw, slug);
                Utc::now()
            }),
            None => {
                tracing::debug!("No date in {}, using current time", slug);
                Utc::now()
            }
        };

        let title = fm
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let words = markdown::count_words(body);

        let mut post = Post::new(title, date, slug.to_string(), source);
        post.tags = dedup_tags(fm.tags);
        post.cover = fm.cover.unwrap_or_default();
        post.author = fm.author.unwrap_or_default();
        post.excerpt = markdown::excerpt(body);
        post.reading_time = markdown::reading_time(words, self.words_per_minute);
        post.content = body.to_string();

        Ok(post)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(markdown::DEFAULT_WORDS_PER_MINUTE)
    }
}

/// Trim tags and drop empty or repeated ones, keeping first occurrences
fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !seen.iter().any(|t| t == tag) {
            seen.push(tag.to_string());
        }
    }
    seen
}
