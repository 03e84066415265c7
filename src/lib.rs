//! blogroll: aggregates markdown posts from a local store and remote
//! repositories into one paginated, searchable, syndicated list.
//!
//! The [`Blogroll`] application wires configuration to the engine pieces:
//! [`source`] adapters feed the [`aggregator::Aggregator`] (which pages the
//! local side through [`pagination::Paginator`]), [`search`] narrows the
//! merged list, [`feed`] serializes it and [`views`] keeps per-post counters.

pub mod aggregator;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod pagination;
pub mod search;
pub mod source;
pub mod views;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use aggregator::Aggregator;
use content::Normalizer;
use feed::FeedChannel;
use pagination::Paginator;
use source::{LocalSource, RemoteSource};
use views::{JsonFileStore, ViewCounter};

/// The main application
#[derive(Clone)]
pub struct Blogroll {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding local markdown files
    pub local_root: PathBuf,
    /// Local manifest file
    pub manifest_path: PathBuf,
    /// Persisted view counters
    pub views_path: PathBuf,
}

impl Blogroll {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let local_root = base_dir.join(&config.local.root);
        let manifest_path = base_dir.join(&config.local.manifest);
        let views_path = base_dir.join(&config.views_file);

        Self {
            config,
            base_dir,
            local_root,
            manifest_path,
            views_path,
        }
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.config.words_per_minute)
    }

    /// Build an aggregator over the configured local and remote sources
    pub fn aggregator(&self) -> Result<Aggregator> {
        let local = LocalSource::new(&self.local_root, &self.manifest_path, self.normalizer());
        let remote = RemoteSource::new(&self.config.remote, self.normalizer())?;
        let paginator = Paginator::new(Arc::new(local), self.config.page_size);
        Ok(Aggregator::new(paginator, Arc::new(remote)))
    }

    /// Open the persisted view counters
    pub fn view_counter(&self) -> Result<ViewCounter> {
        let store = JsonFileStore::open(&self.views_path)?;
        Ok(ViewCounter::new(Arc::new(store)))
    }

    pub fn feed_channel(&self) -> FeedChannel {
        FeedChannel::from_config(&self.config)
    }
}
