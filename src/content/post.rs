//! Blog post model

use serde::{Deserialize, Serialize};

use super::frontmatter::{self, optional_scalar_string, scalar_string, string_or_vec};
use super::loader;
use super::{ContentDate, FrontMatterError};

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// File stem of the source document
    pub slug: String,

    pub title: String,

    /// Publication date
    pub date: ContentDate,

    pub excerpt: String,

    /// Raw markdown body
    pub content: String,

    /// Front-matter `readTime`, or an estimate from the body's word count
    pub read_time: String,

    pub tags: Vec<String>,

    /// Unpublished posts are left out of listings but can still be fetched
    /// by slug
    pub published: bool,
}

/// Post front-matter as written on disk
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PostFrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    title: String,
    #[serde(deserialize_with = "scalar_string")]
    date: String,
    #[serde(deserialize_with = "scalar_string")]
    excerpt: String,
    #[serde(deserialize_with = "optional_scalar_string")]
    read_time: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    tags: Vec<String>,
    published: Option<bool>,
}

impl BlogPost {
    /// Build a post from the raw text of its source document
    pub fn from_document(
        slug: &str,
        text: &str,
        words_per_minute: u32,
    ) -> Result<Self, FrontMatterError> {
        let (fm, body) = frontmatter::parse::<PostFrontMatter>(text)?;

        let read_time = fm
            .read_time
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| loader::read_time(body, words_per_minute));

        Ok(Self {
            slug: slug.to_string(),
            title: fm.title,
            date: ContentDate::parse(fm.date),
            excerpt: fm.excerpt,
            content: body.to_string(),
            read_time,
            tags: fm.tags,
            // Only an explicit `false` unpublishes
            published: fm.published != Some(false),
        })
    }

    /// Get the newer neighbour of this post in a newest-first listing
    pub fn prev<'a>(&self, posts: &'a [BlogPost]) -> Option<&'a BlogPost> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        pos.checked_sub(1).map(|i| &posts[i])
    }

    /// Get the older neighbour of this post in a newest-first listing
    pub fn next<'a>(&self, posts: &'a [BlogPost]) -> Option<&'a BlogPost> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        posts.get(pos + 1)
    }
}
