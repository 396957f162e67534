//! Initialize a new content directory

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# Folio Configuration

# Site
title: My Portfolio
author: ''
url: http://example.com

# Directory
content_dir: content
blog_dir: blog
projects_dir: projects
cv_file: cv.md

# Writing
words_per_minute: 200
highlight:
  theme: base16-ocean.dark
  line_number: false
"#;

const CV_TEMPLATE: &str = r#"---
personal:
  name: Your Name
  title: ''
  summary: ''
  email: ''
experience: []
skills: {}
education: []
certifications: []
projects: []
languages: []
---
"#;

/// Initialize a site in the given directory.
///
/// Existing files are left untouched, so running this over a populated
/// directory only fills in what is missing.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    let config_path = target_dir.join(CONFIG_FILE);
    write_if_absent(&config_path, CONFIG_TEMPLATE)?;

    // Lay out directories from whatever config is now in place
    let config = SiteConfig::load(&config_path)?;
    let blog = config.blog_path(target_dir);
    fs::create_dir_all(&blog)?;
    fs::create_dir_all(config.projects_path(target_dir))?;

    write_if_absent(&config.cv_path(target_dir), CV_TEMPLATE)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
excerpt: The first post on this site.
tags: [meta]
---

Welcome! This is your very first post.

## Quick Start

### Create a new post

```bash
$ folio new post "My New Post"
```

### List what you have

```bash
$ folio list posts
```
"#,
        now.format("%Y-%m-%d")
    );
    write_if_absent(&blog.join("hello-world.md"), &sample_post)?;

    Ok(())
}

fn write_if_absent(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        tracing::debug!("Keeping existing {:?}", path);
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}
