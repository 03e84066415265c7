//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Default configuration written by `init`
const CONFIG_TEMPLATE: &str = r#"# blogroll configuration

# Feed channel
title: MY BLOG
description: A blog
language: en-us

# Local posts per "load more" page
page_size: 10

# Reading speed used for reading-time estimates
words_per_minute: 200

local:
  root: source/posts
  manifest: source/posts/manifest.json

remote:
  api_base: https://api.github.com
  web_base: https://github.com
  # timeout_secs: 30
  repos: []
  # repos:
  #   - repo: owner/blog-posts
  #     branch: main
  #     folder: posts

views_file: .blogroll/views.json
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    let posts_dir = target_dir.join("source/posts");
    fs::create_dir_all(&posts_dir)?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let now = chrono::Utc::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
tags:
  - welcome
---

Welcome to your blog! This is your very first post.

## Quick Start

Create a new post with `blogroll new "My New Post"`, then list everything
with `blogroll list` or export a feed with `blogroll feed -o public/rss.xml`.
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(posts_dir.join("hello-world.md"), sample_post)?;
    fs::write(posts_dir.join("manifest.json"), "[\n  \"hello-world.md\"\n]\n")?;

    Ok(())
}
