//! Create a new local post

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::Blogroll;

/// Create a post file and register it at the front of the manifest.
///
/// Returns the path of the created file.
pub fn create_post(
    app: &Blogroll,
    title: &str,
    author: Option<&str>,
    tags: &[String],
) -> Result<PathBuf> {
    let now = chrono::Utc::now();
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable file name", title);
    }

    fs::create_dir_all(&app.local_root)?;

    let filename = format!("{}.md", slug);
    let file_path = app.local_root.join(&filename);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let mut content = String::from("---\n");
    content.push_str(&format!("title: {}\n", yaml_string(title)));
    content.push_str(&format!("date: {}\n", now.format("%Y-%m-%d %H:%M:%S")));
    if let Some(author) = author {
        content.push_str(&format!("author: {}\n", yaml_string(author)));
    }
    content.push_str("tags:\n");
    for tag in tags {
        content.push_str(&format!("  - {}\n", yaml_string(tag)));
    }
    content.push_str("---\n\n");

    let mut manifest = read_manifest(app)?;
    manifest.retain(|id| id != &filename);
    manifest.insert(0, filename);

    fs::write(&file_path, content)?;
    if let Some(parent) = app.manifest_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&app.manifest_path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("Failed to update {:?}", app.manifest_path))?;

    Ok(file_path)
}

/// Current manifest entries; a missing manifest is empty
fn read_manifest(app: &Blogroll) -> Result<Vec<String>> {
    if !app.manifest_path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(&app.manifest_path)?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {:?}", app.manifest_path))
}

/// Quote a scalar so YAML reads it back as the same string
fn yaml_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
}

/// Run the new command
pub fn run(app: &Blogroll, title: &str, author: Option<&str>, tags: &[String]) -> Result<()> {
    let path = create_post(app, title, author, tags)?;
    println!("Created: {:?}", path);
    Ok(())
}
