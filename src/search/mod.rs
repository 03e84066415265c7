//! Search and filtering over an already loaded post collection
//!
//! Everything here is pure: no I/O, no shared state.

use chrono::{DateTime, Utc};

use crate::content::Post;

/// Case-insensitive substring search over title, author, tags and excerpt.
/// A blank query returns the input unchanged.
pub fn search(posts: &[Post], query: &str) -> Vec<Post> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return posts.to_vec();
    }

    posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&query)
                || post.author.to_lowercase().contains(&query)
                || post.tags.iter().any(|t| t.to_lowercase().contains(&query))
                || post.excerpt.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Keep posts carrying every selected tag (case-insensitive).
/// No selection returns the input unchanged.
pub fn filter_by_tags(posts: &[Post], selected: &[String]) -> Vec<Post> {
    if selected.is_empty() {
        return posts.to_vec();
    }

    posts
        .iter()
        .filter(|post| selected.iter().all(|tag| post.has_tag(tag)))
        .cloned()
        .collect()
}

/// Case-insensitive substring match on the author
pub fn filter_by_author(posts: &[Post], query: &str) -> Vec<Post> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return posts.to_vec();
    }

    posts
        .iter()
        .filter(|post| post.author.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Keep posts dated within `[from, to]`.
///
/// A missing `from` means the epoch and a missing `to` means now. With both
/// bounds missing the input is returned unchanged.
pub fn filter_by_date_range(
    posts: &[Post],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<Post> {
    if from.is_none() && to.is_none() {
        return posts.to_vec();
    }

    let from = from.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    let to = to.unwrap_or_else(Utc::now);

    posts
        .iter()
        .filter(|post| post.date >= from && post.date <= to)
        .cloned()
        .collect()
}

/// Tags, then author, then date range; each narrows the previous result
pub fn apply_filters(
    posts: &[Post],
    tags: &[String],
    author: &str,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<Post> {
    let filtered = filter_by_tags(posts, tags);
    let filtered = filter_by_author(&filtered, author);
    filter_by_date_range(&filtered, from, to)
}

/// A complete set of listing criteria
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub query: String,
    pub tags: Vec<String>,
    pub author: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl PostFilter {
    /// Text search followed by [`apply_filters`]
    pub fn apply(&self, posts: &[Post]) -> Vec<Post> {
        let matched = search(posts, &self.query);
        apply_filters(&matched, &self.tags, &self.author, self.from, self.to)
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.tags.is_empty()
            && self.author.trim().is_empty()
            && self.from.is_none()
            && self.to.is_none()
    }
}

/// Distinct tags in first-seen order
pub fn collect_tags(posts: &[Post]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in posts.iter().flat_map(|p| &p.tags) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Distinct non-empty authors in first-seen order
pub fn collect_authors(posts: &[Post]) -> Vec<String> {
    let mut authors: Vec<String> = Vec::new();
    for post in posts {
        if !post.author.is_empty() && !authors.contains(&post.author) {
            authors.push(post.author.clone());
        }
    }
    authors
}

/// First post with the given slug
pub fn find_by_slug<'a>(posts: &'a [Post], slug: &str) -> Option<&'a Post> {
    posts.iter().find(|p| p.slug == slug)
}
