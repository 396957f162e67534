//! CV repository

use std::fs;
use std::path::{Path, PathBuf};

use crate::content::CvData;
use crate::error::{ContentError, Result};

/// Reads the CV from its single document
#[derive(Debug, Clone)]
pub struct CvRepository {
    path: PathBuf,
}

impl CvRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the CV. Unlike posts and projects there is no not-found
    /// outcome: a missing document is a [`ContentError::CvRead`].
    pub fn load(&self) -> Result<CvData> {
        let text = fs::read_to_string(&self.path).map_err(|source| ContentError::CvRead {
            path: self.path.clone(),
            source,
        })?;

        let cv = CvData::from_document(&text)
            .map_err(|e| ContentError::malformed(&self.path, e))?;

        tracing::debug!(
            "Loaded CV from {:?}: {} positions, {} skill categories",
            self.path,
            cv.experience.len(),
            cv.skills.len()
        );
        Ok(cv)
    }
}
