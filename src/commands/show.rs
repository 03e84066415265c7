//! Open a single post

use anyhow::Result;

use super::load_posts;
use crate::content::Post;
use crate::search;
use crate::Blogroll;

/// Find `slug` among the aggregated posts and count a view for it
pub async fn open_post(app: &Blogroll, slug: &str, extra_pages: usize) -> Result<(Post, u64)> {
    let posts = load_posts(app, extra_pages).await?;
    let Some(post) = search::find_by_slug(&posts, slug) else {
        anyhow::bail!("No post with slug {:?} (try --pages to load more)", slug);
    };

    let views = app.view_counter()?.record_view(slug)?;
    Ok((post.clone(), views))
}

/// Print a post with its metadata
pub async fn run(app: &Blogroll, slug: &str, extra_pages: usize) -> Result<()> {
    let (post, views) = open_post(app, slug, extra_pages).await?;

    println!("{}", post.title);
    println!(
        "{} | {} | {} min read | {} views",
        post.date.format("%Y-%m-%d"),
        if post.author.is_empty() { "unknown" } else { &post.author },
        post.reading_time,
        views
    );
    if !post.tags.is_empty() {
        println!("#{}", post.tags.join(" #"));
    }
    if let Some(url) = &post.repo_url {
        println!("{}", url);
    }
    println!();
    println!("{}", post.content);

    Ok(())
}
