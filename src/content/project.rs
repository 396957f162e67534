//! Project model

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::frontmatter::{self, optional_scalar_string, scalar_string, string_or_vec};
use super::{ContentDate, FrontMatterError};

/// Category given to projects that do not declare one
pub const DEFAULT_CATEGORY: &str = "Other";

/// Lifecycle of a project.
///
/// Values outside the known three are kept as [`ProjectStatus::Other`]
/// instead of being rejected or rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ProjectStatus {
    #[default]
    Completed,
    InProgress,
    Archived,
    Other(String),
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in-progress",
            Self::Archived => "archived",
            Self::Other(value) => value,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for ProjectStatus {
    fn from(value: &str) -> Self {
        match value {
            "" | "completed" => Self::Completed,
            "in-progress" => Self::InProgress,
            "archived" => Self::Archived,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProjectStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A showcased project
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub slug: String,
    pub title: String,
    /// One-line summary from front-matter
    pub description: String,
    /// Raw markdown body
    pub long_description: String,
    pub technologies: Vec<String>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub featured: bool,
    pub status: ProjectStatus,
    pub start_date: ContentDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<ContentDate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectFrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    title: String,
    #[serde(deserialize_with = "scalar_string")]
    description: String,
    #[serde(deserialize_with = "string_or_vec")]
    technologies: Vec<String>,
    #[serde(deserialize_with = "scalar_string")]
    category: String,
    #[serde(deserialize_with = "optional_scalar_string")]
    github_url: Option<String>,
    #[serde(deserialize_with = "optional_scalar_string")]
    live_url: Option<String>,
    #[serde(deserialize_with = "optional_scalar_string")]
    image_url: Option<String>,
    featured: Option<bool>,
    #[serde(deserialize_with = "scalar_string")]
    status: String,
    #[serde(deserialize_with = "scalar_string")]
    start_date: String,
    #[serde(deserialize_with = "optional_scalar_string")]
    end_date: Option<String>,
}

impl Project {
    /// Build a project from the raw text of its source document
    pub fn from_document(slug: &str, text: &str) -> Result<Self, FrontMatterError> {
        let (fm, body) = frontmatter::parse::<ProjectFrontMatter>(text)?;

        let category = if fm.category.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            fm.category
        };

        Ok(Self {
            slug: slug.to_string(),
            title: fm.title,
            description: fm.description,
            long_description: body.to_string(),
            technologies: fm.technologies,
            category,
            github_url: fm.github_url,
            live_url: fm.live_url,
            image_url: fm.image_url,
            featured: fm.featured.unwrap_or(false),
            status: ProjectStatus::from(fm.status.as_str()),
            start_date: ContentDate::parse(fm.start_date),
            end_date: fm.end_date.map(ContentDate::parse),
        })
    }
}
