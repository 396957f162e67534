//! Error types for content loading

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::content::FrontMatterError;

/// Errors raised while turning content files into records.
///
/// A missing directory or a missing single document is not an error: list
/// operations return an empty sequence and lookups return `None`.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A file inside a content directory could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The front-matter block is unterminated, is not valid YAML, or has a
    /// field of the wrong type.
    #[error("malformed document {}: {source}", path.display())]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    /// The CV document is missing or unreadable.
    #[error("failed to read CV document {}: {source}", path.display())]
    CvRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, source: FrontMatterError) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            source,
        }
    }

    /// Whether the error comes from a document's shape rather than from I/O.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedDocument { .. })
    }
}

/// Result alias for content operations.
pub type Result<T> = std::result::Result<T, ContentError>;
