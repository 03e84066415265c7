//! Search and filter aggregated posts

use anyhow::Result;

use super::load_posts;
use crate::search::PostFilter;
use crate::Blogroll;

/// Print posts matching `filter`
pub async fn run(app: &Blogroll, filter: &PostFilter, extra_pages: usize) -> Result<()> {
    let posts = load_posts(app, extra_pages).await?;
    let matched = filter.apply(&posts);

    if filter.is_empty() {
        println!("All {} posts:", posts.len());
    } else {
        println!("Matched {} of {} posts:", matched.len(), posts.len());
    }
    for post in matched {
        let tags = if post.tags.is_empty() {
            String::new()
        } else {
            format!(" #{}", post.tags.join(" #"))
        };
        println!(
            "  {} - {} by {}{}",
            post.date.format("%Y-%m-%d"),
            post.title,
            if post.author.is_empty() { "unknown" } else { &post.author },
            tags
        );
        if let Some(url) = &post.repo_url {
            println!("      {}", url);
        }
    }

    Ok(())
}
