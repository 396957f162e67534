//! Create a new post or project

use anyhow::Result;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::PathBuf;

use crate::content::loader::is_valid_slug;
use crate::content::DEFAULT_CATEGORY;
use crate::Folio;

/// Kind of entry to scaffold
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EntryKind {
    Post,
    Project,
}

/// Create a new post or project file with default front-matter.
///
/// New posts start unpublished. The slug defaults to the slugified title.
pub fn create_entry(
    folio: &Folio,
    kind: EntryKind,
    title: &str,
    slug: Option<&str>,
) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if !is_valid_slug(&slug) {
        anyhow::bail!("Cannot derive a file name from {:?}", slug);
    }

    let target_dir = match kind {
        EntryKind::Post => folio.config.blog_path(&folio.base_dir),
        EntryKind::Project => folio.config.projects_path(&folio.base_dir),
    };
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let front_matter = match kind {
        EntryKind::Post => post_front_matter(title, &today),
        EntryKind::Project => project_front_matter(title, &today),
    };

    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&front_matter)?);
    fs::write(&file_path, content)?;

    tracing::info!("Created {:?}", file_path);
    Ok(file_path)
}

fn post_front_matter(title: &str, today: &str) -> Mapping {
    let mut fm = Mapping::new();
    fm.insert("title".into(), title.into());
    fm.insert("date".into(), today.into());
    fm.insert("excerpt".into(), "".into());
    fm.insert("tags".into(), Value::Sequence(Vec::new()));
    fm.insert("published".into(), false.into());
    fm
}

fn project_front_matter(title: &str, today: &str) -> Mapping {
    let mut fm = Mapping::new();
    fm.insert("title".into(), title.into());
    fm.insert("description".into(), "".into());
    fm.insert("technologies".into(), Value::Sequence(Vec::new()));
    fm.insert("category".into(), DEFAULT_CATEGORY.into());
    fm.insert("featured".into(), false.into());
    fm.insert("status".into(), "in-progress".into());
    fm.insert("startDate".into(), today.into());
    fm
}
