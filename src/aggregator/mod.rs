//! Merges local pages with remote repositories into one recency-ordered list

use std::sync::Arc;

use crate::content::Post;
use crate::pagination::Paginator;
use crate::source::PostProvider;

/// Combines the paginated local source with the remote provider
pub struct Aggregator {
    paginator: Paginator,
    remote: Arc<dyn PostProvider>,
}

impl Aggregator {
    /// Create an aggregator over its sources
    pub fn new(paginator: Paginator, remote: Arc<dyn PostProvider>) -> Self {
        Self { paginator, remote }
    }

    /// Loaded local pages plus a fresh remote fetch, newest first.
    ///
    /// Both sides are fetched concurrently. Remote results are never cached.
    /// Equal dates keep input order: local before remote, then source order.
    pub async fn get_all_posts(&mut self) -> Vec<Post> {
        let (local, remote) = tokio::join!(
            self.paginator.get_all_local_posts(),
            self.remote.fetch_all()
        );
        tracing::debug!(
            "Aggregating {} local and {} remote posts",
            local.len(),
            remote.len()
        );
        merge_by_date(local, remote)
    }

    /// Load the next local page and return every local post loaded so far
    pub async fn load_more_posts(&mut self) -> Vec<Post> {
        self.paginator.load_more_posts().await
    }

    /// Whether another local page may exist
    pub fn has_more(&self) -> bool {
        self.paginator.has_more()
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }
}

/// Concatenate and stable-sort by date, newest first
pub fn merge_by_date(local: Vec<Post>, remote: Vec<Post>) -> Vec<Post> {
    let mut posts = local;
    posts.extend(remote);
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    posts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostSource;
    use crate::source::PageSource;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    fn post(slug: &str, day: u32, source: PostSource) -> Post {
        let date = Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap();
        Post::new(slug.to_uppercase(), date, slug.to_string(), source)
    }

    struct FixedPages(Vec<Post>);

    #[async_trait]
    impl PageSource for FixedPages {
        async fn manifest_len(&self) -> usize {
            self.0.len()
        }

        async fn fetch_page(&self, start: usize, limit: usize) -> Vec<Post> {
            self.0.iter().skip(start).take(limit).cloned().collect()
        }
    }

    struct FixedRemote(Vec<Post>);

    #[async_trait]
    impl PostProvider for FixedRemote {
        async fn fetch_all(&self) -> Vec<Post> {
            self.0.clone()
        }
    }

    #[test]
    fn test_merge_sorts_newest_first() {
        let merged = merge_by_date(
            vec![post("a", 1, PostSource::Local), post("b", 5, PostSource::Local)],
            vec![post("c", 3, PostSource::Remote)],
        );
        let slugs: Vec<_> = merged.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_merge_ties_keep_local_first() {
        let merged = merge_by_date(
            vec![post("l1", 2, PostSource::Local), post("l2", 2, PostSource::Local)],
            vec![post("r1", 2, PostSource::Remote), post("r2", 2, PostSource::Remote)],
        );
        let slugs: Vec<_> = merged.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["l1", "l2", "r1", "r2"]);
    }

    #[tokio::test]
    async fn test_get_all_posts_combines_sources() {
        let local: Vec<_> = (1..=3)
            .map(|d| post(&format!("l{}", d), d, PostSource::Local))
            .collect();
        let paginator = Paginator::new(Arc::new(FixedPages(local)), 2);
        let remote = Arc::new(FixedRemote(vec![post("r", 10, PostSource::Remote)]));
        let mut aggregator = Aggregator::new(paginator, remote);

        let posts = aggregator.get_all_posts().await;
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["r", "l2", "l1"]);
        assert!(aggregator.has_more());

        aggregator.load_more_posts().await;
        assert!(!aggregator.has_more());
        let posts = aggregator.get_all_posts().await;
        assert_eq!(posts.len(), 4);
        assert!(posts.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[tokio::test]
    async fn test_undated_post_sorts_as_now() {
        let normalizer = crate::content::Normalizer::default();
        let undated = normalizer.parse(
            "---\ntitle: Someday\ndate: someday\n---\nbody",
            "someday",
            PostSource::Remote,
        );
        let local = vec![post("l1", 3, PostSource::Local), post("l2", 9, PostSource::Local)];
        let remote = vec![post("r1", 5, PostSource::Remote), undated];

        let paginator = Paginator::new(Arc::new(FixedPages(local)), 10);
        let mut aggregator = Aggregator::new(paginator, Arc::new(FixedRemote(remote)));

        let posts = aggregator.get_all_posts().await;
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["someday", "l2", "r1", "l1"]);
        assert!(!posts[0].is_invalid());
        assert!(posts.windows(2).all(|w| w[0].date >= w[1].date));
    }
}
