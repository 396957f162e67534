//! Content module - typed records parsed from Markdown documents

mod cv;
mod date;
pub mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod project;

pub use cv::{Certification, CvData, CvProject, Education, Experience, Language, Personal};
pub use date::ContentDate;
pub use frontmatter::FrontMatterError;
pub use markdown::MarkdownRenderer;
pub use post::BlogPost;
pub use project::{Project, ProjectStatus, DEFAULT_CATEGORY};
