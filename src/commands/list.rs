//! List aggregated content

use anyhow::Result;

use super::load_posts;
use crate::search;
use crate::Blogroll;

/// List site content by type
pub async fn run(app: &Blogroll, content_type: &str, extra_pages: usize) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = load_posts(app, extra_pages).await?;
            let views = app.view_counter()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}] {} min, {} views",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.source,
                    post.reading_time,
                    views.get_views(&post.slug)
                );
            }
        }
        "tag" | "tags" => {
            let posts = load_posts(app, extra_pages).await?;
            let tags = search::collect_tags(&posts);
            println!("Tags ({}):", tags.len());
            for tag in tags {
                let count = search::filter_by_tags(&posts, std::slice::from_ref(&tag)).len();
                println!("  {} ({})", tag, count);
            }
        }
        "author" | "authors" => {
            let posts = load_posts(app, extra_pages).await?;
            let authors = search::collect_authors(&posts);
            println!("Authors ({}):", authors.len());
            for author in authors {
                let count = posts.iter().filter(|p| p.author == author).count();
                println!("  {} ({})", author, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, author",
                content_type
            );
        }
    }

    Ok(())
}
