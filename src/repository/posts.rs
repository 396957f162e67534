//! Blog post repository

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::content::loader::{self, SourceFile, DEFAULT_WORDS_PER_MINUTE};
use crate::content::BlogPost;
use crate::error::{ContentError, Result};

/// Reads blog posts from a directory of Markdown files
#[derive(Debug, Clone)]
pub struct PostRepository {
    dir: PathBuf,
    words_per_minute: u32,
}

impl PostRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }

    /// Set the reading speed used for computed read times
    pub fn with_words_per_minute(mut self, words_per_minute: u32) -> Self {
        self.words_per_minute = words_per_minute;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All published posts, newest first.
    ///
    /// Posts sharing a date are ordered by slug. A missing directory yields
    /// an empty list.
    pub fn list_published(&self) -> Result<Vec<BlogPost>> {
        let mut posts = Vec::new();

        for source in loader::list_sources(&self.dir)? {
            let post = self.load(&source, &source.read()?)?;
            if post.published {
                posts.push(post);
            } else {
                tracing::debug!("Skipping unpublished post {}", post.slug);
            }
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        tracing::debug!("Loaded {} published posts from {:?}", posts.len(), self.dir);
        Ok(posts)
    }

    /// Look up one post by slug, published or not.
    ///
    /// A missing, unreadable or malformed document is `Ok(None)`. Listings
    /// still report malformed documents as errors.
    pub fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        let Some(source) = loader::find_source(&self.dir, slug) else {
            return Ok(None);
        };

        let text = match source.read() {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Treating unreadable post as missing: {}", e);
                return Ok(None);
            }
        };

        match self.load(&source, &text) {
            Ok(post) => Ok(Some(post)),
            Err(e) => {
                tracing::warn!("Treating malformed post as missing: {}", e);
                Ok(None)
            }
        }
    }

    /// Distinct tags of all published posts, sorted
    pub fn list_tags(&self) -> Result<Vec<String>> {
        let tags: BTreeSet<String> = self
            .list_published()?
            .into_iter()
            .flat_map(|post| post.tags)
            .collect();
        Ok(tags.into_iter().collect())
    }

    /// Published posts carrying `tag`, newest first
    pub fn list_by_tag(&self, tag: &str) -> Result<Vec<BlogPost>> {
        let mut posts = self.list_published()?;
        posts.retain(|post| post.tags.iter().any(|t| t == tag));
        Ok(posts)
    }

    /// Slugs of all published posts, in listing order
    pub fn slugs(&self) -> Result<Vec<String>> {
        Ok(self
            .list_published()?
            .into_iter()
            .map(|post| post.slug)
            .collect())
    }

    fn load(&self, source: &SourceFile, text: &str) -> Result<BlogPost> {
        let post = BlogPost::from_document(&source.slug, text, self.words_per_minute)
            .map_err(|e| ContentError::malformed(&source.path, e))?;
        loader::flag_date(&source.path, "date", &post.date);
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    fn post(title: &str, date: &str) -> String {
        format!("---\ntitle: {}\ndate: {}\n---\nBody of {}.\n", title, date, title)
    }

    fn titles(posts: &[BlogPost]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let repo = PostRepository::new(dir.path().join("blog"));
        assert!(repo.list_published().unwrap().is_empty());
        assert!(repo.list_tags().unwrap().is_empty());
        assert_eq!(repo.find_by_slug("anything").unwrap(), None);
    }

    #[test]
    fn test_newest_first() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.md", &post("Middle", "2023-06-01"));
        write(&dir, "b.md", &post("Oldest", "2021-01-15"));
        write(&dir, "c.md", &post("Newest", "2024-02-29"));

        let posts = PostRepository::new(dir.path()).list_published().unwrap();
        assert_eq!(titles(&posts), vec!["Newest", "Middle", "Oldest"]);
        for pair in posts.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn test_same_date_ordered_by_slug() {
        let dir = TempDir::new().unwrap();
        write(&dir, "zeta.md", &post("Zeta", "2024-01-01"));
        write(&dir, "alpha.md", &post("Alpha", "2024-01-01"));
        write(&dir, "mid.md", &post("Mid", "2024-01-01"));

        let posts = PostRepository::new(dir.path()).list_published().unwrap();
        assert_eq!(titles(&posts), vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn test_undated_posts_come_last() {
        let dir = TempDir::new().unwrap();
        write(&dir, "undated.md", "---\ntitle: Undated\n---\n");
        write(&dir, "vague.md", &post("Vague", "sometime"));
        write(&dir, "dated.md", &post("Dated", "2020-01-01"));

        let posts = PostRepository::new(dir.path()).list_published().unwrap();
        assert_eq!(titles(&posts), vec!["Dated", "Vague", "Undated"]);
    }

    #[test]
    fn test_unpublished_hidden_from_listing_but_found_by_slug() {
        let dir = TempDir::new().unwrap();
        write(&dir, "live.md", &post("Live", "2024-01-01"));
        write(
            &dir,
            "draft.md",
            "---\ntitle: Draft\ndate: 2024-05-01\npublished: false\n---\nWIP\n",
        );

        let repo = PostRepository::new(dir.path());
        let posts = repo.list_published().unwrap();
        assert_eq!(titles(&posts), vec!["Live"]);

        let draft = repo.find_by_slug("draft").unwrap().unwrap();
        assert_eq!(draft.title, "Draft");
        assert!(!draft.published);
    }

    #[test]
    fn test_find_by_slug() {
        let dir = TempDir::new().unwrap();
        write(&dir, "hello-world.md", &post("Hello", "2024-01-01"));

        let repo = PostRepository::new(dir.path());
        let found = repo.find_by_slug("hello-world").unwrap().unwrap();
        assert_eq!(found.slug, "hello-world");
        assert_eq!(found.content, "Body of Hello.\n");
        assert_eq!(repo.find_by_slug("missing-slug").unwrap(), None);
        assert_eq!(repo.find_by_slug("../hello-world").unwrap(), None);
    }

    #[test]
    fn test_defaults_applied() {
        let dir = TempDir::new().unwrap();
        let body = "word ".repeat(401);
        write(&dir, "plain.md", &format!("---\ntitle: Plain\n---\n{}", body));

        let post = PostRepository::new(dir.path())
            .find_by_slug("plain")
            .unwrap()
            .unwrap();
        assert!(post.tags.is_empty());
        assert_eq!(post.read_time, "3 min read");
        assert_eq!(post.excerpt, "");
        assert!(post.published);
    }

    #[test]
    fn test_words_per_minute_setting() {
        let dir = TempDir::new().unwrap();
        write(&dir, "p.md", &"word ".repeat(300));

        let repo = PostRepository::new(dir.path()).with_words_per_minute(100);
        let post = repo.find_by_slug("p").unwrap().unwrap();
        assert_eq!(post.read_time, "3 min read");
    }

    #[test]
    fn test_tags() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.md", "---\ndate: 2024-01-01\ntags: [rust, web]\n---\n");
        write(&dir, "b.md", "---\ndate: 2023-01-01\ntags: [async, rust]\n---\n");
        write(
            &dir,
            "c.md",
            "---\ntags: [secret]\npublished: false\n---\n",
        );

        let repo = PostRepository::new(dir.path());
        assert_eq!(repo.list_tags().unwrap(), vec!["async", "rust", "web"]);

        let rust: Vec<_> = repo
            .list_by_tag("rust")
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(rust, vec!["a", "b"]);
        assert!(repo.list_by_tag("secret").unwrap().is_empty());
    }

    #[test]
    fn test_slugs_follow_listing_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "old.md", &post("Old", "2020-01-01"));
        write(&dir, "new.md", &post("New", "2022-01-01"));

        let repo = PostRepository::new(dir.path());
        assert_eq!(repo.slugs().unwrap(), vec!["new", "old"]);
    }

    #[test]
    fn test_listing_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.md", &post("A", "2024-01-01"));
        write(&dir, "b.md", &post("B", "2024-01-01"));
        write(&dir, "c.md", &post("C", "2023-01-01"));

        let repo = PostRepository::new(dir.path());
        assert_eq!(repo.list_published().unwrap(), repo.list_published().unwrap());
    }

    #[test]
    fn test_non_markdown_files_ignored() {
        let dir = TempDir::new().unwrap();
        write(&dir, "post.md", &post("Post", "2024-01-01"));
        write(&dir, "image.png", "not markdown");
        write(&dir, "notes.txt", "---\ntitle: Notes\n---\n");

        let posts = PostRepository::new(dir.path()).list_published().unwrap();
        assert_eq!(titles(&posts), vec!["Post"]);
    }

    #[test]
    fn test_malformed_document_propagates() {
        let dir = TempDir::new().unwrap();
        write(&dir, "good.md", &post("Good", "2024-01-01"));
        write(&dir, "bad.md", "---\ntitle: Bad\ntags: {a: 1}\n---\n");

        let repo = PostRepository::new(dir.path());
        let err = repo.list_published().unwrap_err();
        assert!(matches!(err, ContentError::MalformedDocument { .. }));
        assert!(err.to_string().contains("bad.md"));
    }

    #[test]
    fn test_malformed_document_not_found_by_slug() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bad.md", "---\ntags: {a: 1}\n---\n");
        write(&dir, "open.md", "---\ntitle: Never closed\n");

        let repo = PostRepository::new(dir.path());
        assert_eq!(repo.find_by_slug("bad").unwrap(), None);
        assert_eq!(repo.find_by_slug("open").unwrap(), None);
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let dir = TempDir::new().unwrap();
        write(&dir, "good.md", &post("Good", "2024-01-01"));
        fs::write(
            dir.path().join("latin.md"),
            b"---\ntitle: Caf\xe9\ndate: 2024-02-01\n---\nD\xe9j\xe0 vu.\n",
        )
        .unwrap();

        let repo = PostRepository::new(dir.path());
        let posts = repo.list_published().unwrap();
        assert_eq!(titles(&posts), vec!["Caf\u{fffd}", "Good"]);

        let latin = repo.find_by_slug("latin").unwrap().unwrap();
        assert_eq!(latin.content, "D\u{fffd}j\u{fffd} vu.\n");
    }
}
