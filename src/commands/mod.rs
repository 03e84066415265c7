//! CLI commands

pub mod feed;
pub mod init;
pub mod list;
pub mod new;
pub mod search;
pub mod show;
pub mod views;

use anyhow::Result;

use crate::content::Post;
use crate::Blogroll;

/// Aggregate every source, loading `extra_pages` local pages beyond the first
pub async fn load_posts(app: &Blogroll, extra_pages: usize) -> Result<Vec<Post>> {
    let mut aggregator = app.aggregator()?;

    // The first call loads page one; remote sources are only hit below
    for _ in 0..=extra_pages {
        if !aggregator.has_more() {
            break;
        }
        aggregator.load_more_posts().await;
    }

    let posts = aggregator.get_all_posts().await;
    tracing::info!(
        "Loaded {} posts ({} local entries requested, more: {})",
        posts.len(),
        aggregator.paginator().loaded_count(),
        aggregator.has_more()
    );
    Ok(posts)
}
