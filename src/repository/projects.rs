//! Project repository

use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::content::loader::{self, SourceFile};
use crate::content::Project;
use crate::error::{ContentError, Result};

/// Reads projects from a directory of Markdown files
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    dir: PathBuf,
}

impl ProjectRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All projects: featured first, then most recently started, then by slug.
    pub fn list_all(&self) -> Result<Vec<Project>> {
        let mut projects = loader::list_sources(&self.dir)?
            .iter()
            .map(|source| self.load(source, &source.read()?))
            .collect::<Result<Vec<_>>>()?;

        projects.sort_by(|a, b| {
            b.featured
                .cmp(&a.featured)
                .then_with(|| b.start_date.cmp(&a.start_date))
                .then_with(|| a.slug.cmp(&b.slug))
        });

        tracing::debug!("Loaded {} projects from {:?}", projects.len(), self.dir);
        Ok(projects)
    }

    /// Look up one project by slug.
    ///
    /// A missing, unreadable or malformed document is `Ok(None)`. Listings
    /// still report malformed documents as errors.
    pub fn find_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        let Some(source) = loader::find_source(&self.dir, slug) else {
            return Ok(None);
        };

        let text = match source.read() {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Treating unreadable project as missing: {}", e);
                return Ok(None);
            }
        };

        match self.load(&source, &text) {
            Ok(project) => Ok(Some(project)),
            Err(e) => {
                tracing::warn!("Treating malformed project as missing: {}", e);
                Ok(None)
            }
        }
    }

    /// Distinct project categories, sorted
    pub fn list_categories(&self) -> Result<Vec<String>> {
        let categories: BTreeSet<String> = self
            .list_all()?
            .into_iter()
            .map(|project| project.category)
            .collect();
        Ok(categories.into_iter().collect())
    }

    /// Projects grouped by category.
    ///
    /// Categories appear in the order they are first met in [`Self::list_all`],
    /// and each group keeps that order.
    pub fn group_by_category(&self) -> Result<IndexMap<String, Vec<Project>>> {
        let mut groups: IndexMap<String, Vec<Project>> = IndexMap::new();
        for project in self.list_all()? {
            groups
                .entry(project.category.clone())
                .or_default()
                .push(project);
        }
        Ok(groups)
    }

    /// Featured projects, in listing order
    pub fn featured(&self) -> Result<Vec<Project>> {
        let mut projects = self.list_all()?;
        projects.retain(|project| project.featured);
        Ok(projects)
    }

    /// Slugs of all projects, in listing order
    pub fn slugs(&self) -> Result<Vec<String>> {
        Ok(self
            .list_all()?
            .into_iter()
            .map(|project| project.slug)
            .collect())
    }

    fn load(&self, source: &SourceFile, text: &str) -> Result<Project> {
        let project = Project::from_document(&source.slug, text)
            .map_err(|e| ContentError::malformed(&source.path, e))?;

        loader::flag_date(&source.path, "startDate", &project.start_date);
        if let Some(end_date) = &project.end_date {
            loader::flag_date(&source.path, "endDate", end_date);
        }
        if !project.status.is_known() {
            tracing::warn!(
                "{:?}: unknown status {:?}, expected completed, in-progress or archived",
                source.path,
                project.status.as_str()
            );
        }

        Ok(project)
    }
}
