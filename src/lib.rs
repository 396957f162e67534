//! folio-rs: Markdown content repository for a portfolio and blog site
//!
//! Blog posts and projects live as Markdown files with YAML front-matter,
//! one file per entry, and the CV is a single document whose front-matter
//! holds the whole record. This crate reads those files into typed records,
//! applies defaults, orders them, and looks them up by slug.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod repository;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use content::{BlogPost, ContentDate, CvData, MarkdownRenderer, Project, ProjectStatus};
pub use error::ContentError;
pub use repository::{CvRepository, PostRepository, ProjectRepository};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// The main site handle
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
}

impl Folio {
    /// Open a site directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Blog posts repository
    pub fn posts(&self) -> PostRepository {
        PostRepository::new(self.config.blog_path(&self.base_dir))
            .with_words_per_minute(self.config.words_per_minute)
    }

    /// Projects repository
    pub fn projects(&self) -> ProjectRepository {
        ProjectRepository::new(self.config.projects_path(&self.base_dir))
    }

    /// CV repository
    pub fn cv(&self) -> CvRepository {
        CvRepository::new(self.config.cv_path(&self.base_dir))
    }

    /// Markdown renderer using the configured highlighting
    pub fn renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::with_options(&self.config.highlight)
    }

    /// Scaffold a new post or project, returning the created file
    pub fn new_entry(
        &self,
        kind: commands::new::EntryKind,
        title: &str,
        slug: Option<&str>,
    ) -> Result<PathBuf> {
        commands::new::create_entry(self, kind, title, slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.posts().dir(), dir.path().join("content/blog"));
        assert_eq!(folio.projects().dir(), dir.path().join("content/projects"));
        assert_eq!(folio.cv().path(), dir.path().join("content/cv.md"));
    }

    #[test]
    fn test_config_moves_content() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "content_dir: site\nblog_dir: writing\nwords_per_minute: 100\n",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("site/writing")).unwrap();
        fs::write(
            dir.path().join("site/writing/first.md"),
            format!("---\ntitle: First\n---\n{}", "word ".repeat(150)),
        )
        .unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        let posts = folio.posts().list_published().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].read_time, "2 min read");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "words_per_minute: fast\n").unwrap();
        assert!(Folio::new(dir.path()).is_err());
    }

    #[test]
    fn test_repositories_are_independent() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("content/projects")).unwrap();
        fs::write(
            dir.path().join("content/projects/tool.md"),
            "---\ntitle: Tool\n---\n",
        )
        .unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert!(folio.posts().list_published().unwrap().is_empty());
        assert_eq!(folio.projects().list_all().unwrap().len(), 1);
        assert!(folio.cv().load().is_err());
    }
}
