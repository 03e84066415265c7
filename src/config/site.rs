//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::markdown::DEFAULT_WORDS_PER_MINUTE;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Feed channel
    pub title: String,
    pub description: String,
    pub language: String,

    // Pagination
    pub page_size: usize,

    // Reading time
    pub words_per_minute: u32,

    // Sources
    #[serde(default)]
    pub local: LocalConfig,
    #[serde(default)]
    pub remote: RemoteConfig,

    // Persisted view counters
    pub views_file: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "MY BLOG".to_string(),
            description: "A blog".to_string(),
            language: "en-us".to_string(),

            page_size: 10,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,

            local: LocalConfig::default(),
            remote: RemoteConfig::default(),

            views_file: ".blogroll/views.json".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }
        if self.words_per_minute == 0 {
            anyhow::bail!("words_per_minute must be at least 1");
        }
        for repo in &self.remote.repos {
            if !repo.repo.contains('/') {
                anyhow::bail!("remote repo {:?} must be in owner/name form", repo.repo);
            }
        }
        Ok(())
    }
}

/// Local content store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    /// Directory holding the markdown files
    pub root: String,
    /// JSON array of file identifiers, in pagination order
    pub manifest: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            root: "source/posts".to_string(),
            manifest: "source/posts/manifest.json".to_string(),
        }
    }
}

/// Remote repositories
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base of the directory-listing API
    pub api_base: String,
    /// Base of browsable file URLs
    pub web_base: String,
    pub user_agent: String,
    /// Transport timeout; no timeout when unset
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub repos: Vec<RepoSpec>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            web_base: "https://github.com".to_string(),
            user_agent: concat!("blogroll/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
            repos: Vec::new(),
        }
    }
}

/// One (repository, branch, folder) tuple to pull posts from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoSpec {
    /// `owner/name`
    pub repo: String,
    pub branch: String,
    pub folder: String,
    /// Author for posts whose metadata has none
    pub author: Option<String>,
}

impl Default for RepoSpec {
    fn default() -> Self {
        Self {
            repo: String::new(),
            branch: "main".to_string(),
            folder: "posts".to_string(),
            author: None,
        }
    }
}

impl RepoSpec {
    pub fn new(repo: &str, branch: &str, folder: &str) -> Self {
        Self {
            repo: repo.to_string(),
            branch: branch.to_string(),
            folder: folder.to_string(),
            author: None,
        }
    }

    /// Author used when a post from this repository names none
    pub fn fallback_author(&self) -> &str {
        match &self.author {
            Some(author) => author.as_str(),
            None => self.repo.split('/').next().unwrap_or_default(),
        }
    }
}
