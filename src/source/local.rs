//! Local source - manifest-ordered markdown files under a content root

use async_trait::async_trait;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;

use super::PageSource;
use crate::content::{Normalizer, Post, PostSource};
use crate::error::SourceError;

/// Loads posts from a local directory in manifest order
pub struct LocalSource {
    root: PathBuf,
    manifest_path: PathBuf,
    normalizer: Normalizer,
    manifest: OnceCell<Vec<String>>,
}

impl LocalSource {
    /// Create a new local source
    pub fn new<P: AsRef<Path>, M: AsRef<Path>>(
        root: P,
        manifest_path: M,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            manifest_path: manifest_path.as_ref().to_path_buf(),
            normalizer,
            manifest: OnceCell::new(),
        }
    }

    /// Ordered file identifiers, resolved on first use and then cached.
    ///
    /// An unreadable manifest resolves to an empty list for the lifetime of
    /// this source.
    pub async fn list_manifest(&self) -> &[String] {
        self.manifest
            .get_or_init(|| async {
                match self.read_manifest().await {
                    Ok(ids) => {
                        tracing::debug!("Manifest lists {} local posts", ids.len());
                        ids
                    }
                    Err(e) => {
                        tracing::warn!("{}", e);
                        Vec::new()
                    }
                }
            })
            .await
    }

    async fn read_manifest(&self) -> Result<Vec<String>, SourceError> {
        let manifest_error = |reason: String| SourceError::ManifestFetch {
            path: self.manifest_path.display().to_string(),
            reason,
        };

        let content = tokio::fs::read_to_string(&self.manifest_path)
            .await
            .map_err(|e| manifest_error(e.to_string()))?;
        serde_json::from_str::<Vec<String>>(&content).map_err(|e| manifest_error(e.to_string()))
    }

    /// Load a single post by manifest identifier
    async fn load_post(&self, id: &str) -> Result<Post, SourceError> {
        let path = self.root.join(id);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::LocalFileFetch {
                path: path.display().to_string(),
                source,
            })?;

        Ok(self.normalizer.parse(&content, &slug_for(id), PostSource::Local))
    }
}

#[async_trait]
impl PageSource for LocalSource {
    async fn manifest_len(&self) -> usize {
        self.list_manifest().await.len()
    }

    async fn fetch_page(&self, start: usize, limit: usize) -> Vec<Post> {
        let manifest = self.list_manifest().await;
        let end = start.saturating_add(limit).min(manifest.len());
        let Some(ids) = manifest.get(start..end) else {
            return Vec::new();
        };

        let results = join_all(ids.iter().map(|id| self.load_post(id))).await;

        results
            .into_iter()
            .filter_map(|result| match result {
                Ok(post) => Some(post),
                Err(e) => {
                    tracing::warn!("Skipping local post: {}", e);
                    None
                }
            })
            .collect()
    }
}

/// Slug for a manifest identifier: the identifier minus its markdown extension
pub fn slug_for(id: &str) -> String {
    id.strip_suffix(".md")
        .or_else(|| id.strip_suffix(".markdown"))
        .unwrap_or(id)
        .to_string()
}

/// Check if an identifier names a markdown file
pub fn is_markdown_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_site(files: &[(&str, &str)], manifest: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        fs::write(
            dir.path().join("manifest.json"),
            serde_json::to_string(manifest).unwrap(),
        )
        .unwrap();
        dir
    }

    fn source(dir: &TempDir) -> LocalSource {
        LocalSource::new(
            dir.path(),
            dir.path().join("manifest.json"),
            Normalizer::default(),
        )
    }

    #[test]
    fn test_slug_for() {
        assert_eq!(slug_for("post1.md"), "post1");
        assert_eq!(slug_for("nested/post.markdown"), "nested/post");
        assert_eq!(slug_for("README"), "README");
    }

    #[test]
    fn test_is_markdown_file() {
        assert!(is_markdown_file("a.md"));
        assert!(is_markdown_file("a.markdown"));
        assert!(!is_markdown_file("a.txt"));
        assert!(!is_markdown_file("md"));
    }

    #[tokio::test]
    async fn test_fetch_page_in_manifest_order() {
        let dir = write_site(
            &[
                ("a.md", "---\ntitle: A\n---\nalpha"),
                ("b.md", "---\ntitle: B\n---\nbeta"),
                ("c.md", "---\ntitle: C\n---\ngamma"),
            ],
            &["c.md", "a.md", "b.md"],
        );
        let source = source(&dir);

        assert_eq!(source.manifest_len().await, 3);
        let page = source.fetch_page(0, 2).await;
        let titles: Vec<_> = page.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A"]);
        assert!(page.iter().all(|p| p.source == PostSource::Local));

        let rest = source.fetch_page(2, 10).await;
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].slug, "b");
    }

    #[tokio::test]
    async fn test_missing_file_is_dropped() {
        let dir = write_site(
            &[("a.md", "---\ntitle: A\n---\nalpha")],
            &["a.md", "gone.md"],
        );
        let page = source(&dir).fetch_page(0, 10).await;
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].slug, "a");
    }

    #[tokio::test]
    async fn test_missing_manifest_is_empty() {
        let dir = TempDir::new().unwrap();
        let source = source(&dir);
        assert_eq!(source.manifest_len().await, 0);
        assert!(source.fetch_page(0, 10).await.is_empty());
    }

    #[tokio::test]
    async fn test_manifest_is_cached() {
        let dir = write_site(&[("a.md", "alpha")], &["a.md"]);
        let source = source(&dir);
        assert_eq!(source.manifest_len().await, 1);

        fs::write(dir.path().join("manifest.json"), r#"["a.md", "b.md"]"#).unwrap();
        assert_eq!(source.manifest_len().await, 1);
    }

    #[tokio::test]
    async fn test_out_of_range_page_is_empty() {
        let dir = write_site(&[("a.md", "alpha")], &["a.md"]);
        assert!(source(&dir).fetch_page(5, 10).await.is_empty());
    }
}
