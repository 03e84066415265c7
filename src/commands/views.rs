//! Inspect or bump a post's view counter

use anyhow::Result;

use crate::Blogroll;

/// Print the views of `slug`, counting one more first when `increment` is set
pub fn run(app: &Blogroll, slug: &str, increment: bool) -> Result<()> {
    let counter = app.view_counter()?;
    let views = if increment {
        counter.record_view(slug)?
    } else {
        counter.get_views(slug)
    };
    println!("{}: {} views", slug, views);
    Ok(())
}
