//! Incremental "load more" state for the local source

use std::sync::Arc;

use crate::content::Post;
use crate::source::PageSource;

/// Where a [`Paginator`] stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// Manifest not resolved yet
    Uninitialized,
    /// Some pages loaded, more remain
    PartiallyLoaded,
    /// Every manifest entry has been requested
    Exhausted,
}

/// Owns the loaded local pages.
///
/// `load_more_posts` takes `&mut self`, so one instance cannot be advanced
/// from two tasks at once.
pub struct Paginator {
    source: Arc<dyn PageSource>,
    page_size: usize,
    manifest_len: Option<usize>,
    /// Manifest entries requested so far. Dropped files still count, so the
    /// next page never re-requests them.
    loaded_count: usize,
    posts: Vec<Post>,
}

impl Paginator {
    /// Create a paginator; a zero page size is raised to one
    pub fn new(source: Arc<dyn PageSource>, page_size: usize) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            manifest_len: None,
            loaded_count: 0,
            posts: Vec::new(),
        }
    }

    /// Manifest entries requested so far
    pub fn loaded_count(&self) -> usize {
        self.loaded_count
    }

    pub fn state(&self) -> PageState {
        match self.manifest_len {
            None => PageState::Uninitialized,
            Some(len) if self.loaded_count < len => PageState::PartiallyLoaded,
            Some(_) => PageState::Exhausted,
        }
    }

    /// Whether another page may exist. True until the manifest is resolved.
    pub fn has_more(&self) -> bool {
        self.state() != PageState::Exhausted
    }

    /// Current local posts, loading the first page if nothing is loaded yet.
    ///
    /// A manifest no longer than one page is loaded whole and the paginator
    /// becomes exhausted.
    pub async fn get_all_local_posts(&mut self) -> Vec<Post> {
        let total = self.resolve_manifest().await;
        if self.loaded_count == 0 && total > 0 {
            self.load_next_page(total).await;
        }
        self.posts.clone()
    }

    /// Append the next page. Once exhausted this is a no-op returning the
    /// unchanged set.
    pub async fn load_more_posts(&mut self) -> Vec<Post> {
        let total = self.resolve_manifest().await;
        if self.loaded_count < total {
            self.load_next_page(total).await;
        }
        self.posts.clone()
    }

    async fn resolve_manifest(&mut self) -> usize {
        match self.manifest_len {
            Some(len) => len,
            None => {
                let len = self.source.manifest_len().await;
                self.manifest_len = Some(len);
                len
            }
        }
    }

    async fn load_next_page(&mut self, total: usize) {
        let start = self.loaded_count;
        let page = self.source.fetch_page(start, self.page_size).await;
        self.loaded_count = start.saturating_add(self.page_size).min(total);
        tracing::debug!(
            "Loaded local page at {}: {} posts, {}/{} requested",
            start,
            page.len(),
            self.loaded_count,
            total
        );
        self.posts.extend(page);
    }
}
