//! Export the aggregated posts as RSS

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::load_posts;
use crate::feed::to_feed;
use crate::search::PostFilter;
use crate::Blogroll;

/// Write the feed to `output`, or stdout when absent
pub async fn run(
    app: &Blogroll,
    filter: &PostFilter,
    extra_pages: usize,
    output: Option<&Path>,
) -> Result<()> {
    let posts = load_posts(app, extra_pages).await?;
    let posts = filter.apply(&posts);
    let document = to_feed(&posts, &app.feed_channel());

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, document).with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!("Wrote {} items to {:?}", posts.len(), path);
        }
        None => print!("{}", document),
    }

    Ok(())
}
