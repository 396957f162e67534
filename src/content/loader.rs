//! Content loader - finds and reads Markdown documents in content directories

use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::ContentDate;
use crate::error::{ContentError, Result};

/// Extensions recognized as Markdown, in lookup priority order
pub const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Reading speed used for computed read times
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// A Markdown document found in a content directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File stem, used as the record's slug
    pub slug: String,
    pub path: PathBuf,
}

impl SourceFile {
    /// Read the document as text. Invalid UTF-8 is replaced with U+FFFD.
    pub fn read(&self) -> Result<String> {
        let bytes = fs::read(&self.path).map_err(|e| ContentError::io(&self.path, e))?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::warn!(
                    "{:?} is not valid UTF-8; invalid bytes were replaced",
                    self.path
                );
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }
}

/// List the Markdown documents directly inside `dir`, ordered by file name.
///
/// A directory that does not exist holds no documents. When two files share
/// a stem (`a.md` and `a.markdown`), the one with the higher priority
/// extension wins.
pub fn list_sources(dir: &Path) -> Result<Vec<SourceFile>> {
    if !dir.exists() {
        tracing::debug!("Content directory {:?} does not exist", dir);
        return Ok(Vec::new());
    }

    let mut sources: IndexMap<String, PathBuf> = IndexMap::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            ContentError::io(path, e.into())
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown_file(path) {
            continue;
        }

        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            tracing::warn!("Skipping {:?}: file name is not valid UTF-8", path);
            continue;
        };

        match sources.get_mut(slug) {
            Some(existing) => {
                if extension_rank(path) < extension_rank(existing.as_path()) {
                    tracing::warn!("{:?} shadows {:?}", path, existing);
                    *existing = path.to_path_buf();
                } else {
                    tracing::warn!("{:?} is shadowed by {:?}", path, existing);
                }
            }
            None => {
                sources.insert(slug.to_string(), path.to_path_buf());
            }
        }
    }

    Ok(sources
        .into_iter()
        .map(|(slug, path)| SourceFile { slug, path })
        .collect())
}

/// Locate the document for `slug` inside `dir`.
///
/// Slugs that are not a plain file stem never match, so a lookup cannot
/// escape the content directory.
pub fn find_source(dir: &Path, slug: &str) -> Option<SourceFile> {
    if !is_valid_slug(slug) {
        tracing::debug!("Rejected slug {:?}", slug);
        return None;
    }

    MARKDOWN_EXTENSIONS.iter().find_map(|ext| {
        let path = dir.join(format!("{}.{}", slug, ext));
        path.is_file().then(|| SourceFile {
            slug: slug.to_string(),
            path,
        })
    })
}

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| MARKDOWN_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0'])
}

fn extension_rank(path: &Path) -> usize {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(|e| MARKDOWN_EXTENSIONS.iter().position(|known| *known == e))
        .unwrap_or(MARKDOWN_EXTENSIONS.len())
}

/// Estimated reading time of a Markdown body, e.g. `"3 min read"`.
///
/// An empty body still counts as one word.
pub fn read_time(body: &str, words_per_minute: u32) -> String {
    let words = body.split_whitespace().count().max(1);
    let per_minute = words_per_minute.max(1) as usize;
    format!("{} min read", words.div_ceil(per_minute))
}

/// Log dates that were given but could not be parsed
pub(crate) fn flag_date(path: &Path, field: &str, date: &ContentDate) {
    if date.is_unrecognized() {
        tracing::warn!(
            "{:?}: `{}` value {:?} is not a recognized date; it sorts as undated",
            path,
            field,
            date.as_str()
        );
    }
}
