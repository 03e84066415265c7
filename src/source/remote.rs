//! Remote source - markdown folders in hosted git repositories

use anyhow::Result;
use async_trait::async_trait;
use futures::future::join_all;
use serde::Deserialize;
use std::time::Duration;

use super::local::{is_markdown_file, slug_for};
use super::PostProvider;
use crate::config::{RemoteConfig, RepoSpec};
use crate::content::{Normalizer, Post, PostSource};
use crate::error::SourceError;

/// One entry of a repository directory listing
#[derive(Debug, Clone, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub download_url: Option<String>,
}

impl RepoEntry {
    /// Markdown file with a usable download URL
    fn is_post(&self) -> bool {
        self.kind == "file"
            && is_markdown_file(&self.name)
            && self.download_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// Fetches posts from every configured repository
pub struct RemoteSource {
    client: reqwest::Client,
    api_base: String,
    web_base: String,
    repos: Vec<RepoSpec>,
    normalizer: Normalizer,
}

impl RemoteSource {
    /// Create a remote source from configuration
    pub fn new(config: &RemoteConfig, normalizer: Normalizer) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            web_base: config.web_base.trim_end_matches('/').to_string(),
            repos: config.repos.clone(),
            normalizer,
        })
    }

    /// List the configured folder of one repository
    pub async fn list_repo(&self, spec: &RepoSpec) -> Result<Vec<RepoEntry>, SourceError> {
        let url = format!(
            "{}/repos/{}/contents/{}",
            self.api_base,
            spec.repo,
            spec.folder.trim_matches('/')
        );
        let listing_error = |reason: String| SourceError::RemoteListing {
            repo: spec.repo.clone(),
            branch: spec.branch.clone(),
            folder: spec.folder.clone(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .query(&[("ref", spec.branch.as_str())])
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| listing_error(e.to_string()))?;

        response
            .json::<Vec<RepoEntry>>()
            .await
            .map_err(|e| listing_error(format!("unexpected listing body: {}", e)))
    }

    /// Fetch every post in one repository.
    ///
    /// Files are downloaded concurrently; a listing failure yields nothing and
    /// a failed file is skipped without affecting its siblings.
    pub async fn fetch_repo(&self, spec: &RepoSpec) -> Vec<Post> {
        let entries = match self.list_repo(spec).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("{}", e);
                return Vec::new();
            }
        };

        let files: Vec<_> = entries.iter().filter(|e| e.is_post()).collect();
        tracing::debug!("{}: {} markdown files", spec.repo, files.len());

        let results = join_all(files.into_iter().map(|entry| self.fetch_file(spec, entry))).await;

        results
            .into_iter()
            .filter_map(|result| match result {
                Ok(post) => Some(post),
                Err(e) => {
                    tracing::warn!("Skipping remote post: {}", e);
                    None
                }
            })
            .collect()
    }

    async fn fetch_file(&self, spec: &RepoSpec, entry: &RepoEntry) -> Result<Post, SourceError> {
        let url = entry.download_url.as_deref().unwrap_or_default();
        let fetch_error = |reason: String| SourceError::RemoteFileFetch {
            location: url.to_string(),
            reason,
        };

        let text = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| fetch_error(e.to_string()))?
            .text()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let mut post = self
            .normalizer
            .parse(&text, &slug_for(&entry.name), PostSource::Remote);
        if !post.is_invalid() && post.author.is_empty() {
            post.author = spec.fallback_author().to_string();
        }
        post.repo_url = Some(self.browse_url(spec, &entry.path));
        Ok(post)
    }

    /// Browsable URL of a file: `<web_base>/<repo>/blob/<branch>/<path>`
    pub fn browse_url(&self, spec: &RepoSpec, path: &str) -> String {
        format!(
            "{}/{}/blob/{}/{}",
            self.web_base,
            spec.repo,
            spec.branch,
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl PostProvider for RemoteSource {
    /// Repositories are visited one after another; each is isolated from the
    /// others' failures.
    async fn fetch_all(&self) -> Vec<Post> {
        let mut posts = Vec::new();
        for spec in &self.repos {
            posts.extend(self.fetch_repo(spec).await);
        }
        posts
    }
}
