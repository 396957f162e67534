//! CV model
//!
//! The CV is a single document whose front-matter is the entire record.
//! Sections that are absent come back empty.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::frontmatter::{
    self, null_as_default, optional_scalar_string, scalar_string, string_or_vec,
};
use super::FrontMatterError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvData {
    #[serde(deserialize_with = "null_as_default")]
    pub personal: Personal,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<Experience>,
    /// Skill category to skills, in declaration order
    #[serde(deserialize_with = "null_as_default")]
    pub skills: IndexMap<String, Vec<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<Certification>,
    /// Projects listed on the CV; unrelated to the project directory
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<CvProject>,
    #[serde(deserialize_with = "null_as_default")]
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Personal {
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub title: String,
    #[serde(deserialize_with = "scalar_string")]
    pub summary: String,
    #[serde(deserialize_with = "scalar_string")]
    pub email: String,
    #[serde(deserialize_with = "scalar_string")]
    pub phone: String,
    #[serde(deserialize_with = "scalar_string")]
    pub location: String,
    #[serde(deserialize_with = "scalar_string")]
    pub website: String,
    #[serde(deserialize_with = "scalar_string")]
    pub github: String,
    #[serde(deserialize_with = "scalar_string")]
    pub linkedin: String,
}

/// A position held
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    #[serde(deserialize_with = "scalar_string")]
    pub title: String,
    #[serde(deserialize_with = "scalar_string")]
    pub company: String,
    #[serde(deserialize_with = "scalar_string")]
    pub location: String,
    #[serde(deserialize_with = "scalar_string")]
    pub start_date: String,
    /// Free text, commonly "Present"
    #[serde(deserialize_with = "scalar_string")]
    pub end_date: String,
    #[serde(deserialize_with = "string_or_vec")]
    pub description: Vec<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(deserialize_with = "scalar_string")]
    pub degree: String,
    #[serde(deserialize_with = "scalar_string")]
    pub institution: String,
    #[serde(deserialize_with = "scalar_string")]
    pub year: String,
    #[serde(
        deserialize_with = "optional_scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub issuer: String,
    #[serde(deserialize_with = "scalar_string")]
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvProject {
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub description: String,
    #[serde(deserialize_with = "string_or_vec")]
    pub technologies: Vec<String>,
    #[serde(
        deserialize_with = "optional_scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub github: Option<String>,
    #[serde(
        deserialize_with = "optional_scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub live: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    #[serde(deserialize_with = "scalar_string")]
    pub language: String,
    #[serde(deserialize_with = "scalar_string")]
    pub proficiency: String,
}

impl CvData {
    /// Parse the CV document. The Markdown body is discarded.
    pub fn from_document(text: &str) -> Result<Self, FrontMatterError> {
        let (cv, _body) = frontmatter::parse::<CvData>(text)?;
        Ok(cv)
    }

    /// Number of skills across all categories
    pub fn skill_count(&self) -> usize {
        self.skills.values().map(Vec::len).sum()
    }
}
