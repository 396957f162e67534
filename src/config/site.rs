//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::loader::DEFAULT_WORDS_PER_MINUTE;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub url: String,

    // Directory
    /// Root of all content, relative to the site directory
    pub content_dir: String,
    /// Blog posts, relative to `content_dir`
    pub blog_dir: String,
    /// Projects, relative to `content_dir`
    pub projects_dir: String,
    /// CV document, relative to `content_dir`
    pub cv_file: String,

    // Writing
    pub words_per_minute: u32,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            author: String::new(),
            url: "http://example.com".to_string(),

            content_dir: "content".to_string(),
            blog_dir: "blog".to_string(),
            projects_dir: "projects".to_string(),
            cv_file: "cv.md".to_string(),

            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            highlight: HighlightConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }

    /// Directory holding blog posts
    pub fn blog_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.content_dir).join(&self.blog_dir)
    }

    /// Directory holding projects
    pub fn projects_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.content_dir).join(&self.projects_dir)
    }

    /// Path of the CV document
    pub fn cv_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.content_dir).join(&self.cv_file)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Name of a syntect bundled theme
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
