//! Show a single post, project, or the CV

use anyhow::{Context, Result};
use serde::Serialize;

use crate::content::{BlogPost, CvData, Project};
use crate::Folio;

/// How a record is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Front-matter summary followed by the raw Markdown body
    #[default]
    Text,
    /// Body rendered to HTML
    Html,
    Json,
}

/// Show one post by slug, published or not
pub fn post(folio: &Folio, slug: &str, format: OutputFormat) -> Result<()> {
    let post = folio
        .posts()
        .find_by_slug(slug)?
        .with_context(|| format!("Post not found: {}", slug))?;
    println!("{}", format_post(folio, &post, format)?);
    Ok(())
}

/// Show one project by slug
pub fn project(folio: &Folio, slug: &str, format: OutputFormat) -> Result<()> {
    let project = folio
        .projects()
        .find_by_slug(slug)?
        .with_context(|| format!("Project not found: {}", slug))?;
    println!("{}", format_project(folio, &project, format)?);
    Ok(())
}

/// Show the CV
pub fn cv(folio: &Folio, format: OutputFormat) -> Result<()> {
    let cv = folio.cv().load()?;
    println!("{}", format_cv(folio, &cv, format)?);
    Ok(())
}

pub fn format_post(folio: &Folio, post: &BlogPost, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(post),
        OutputFormat::Html => Ok(folio.renderer().render(&post.content)),
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&format!("{}\n", post.title));
            out.push_str(&format!("{} · {}\n", post.date, post.read_time));
            if !post.tags.is_empty() {
                out.push_str(&format!("Tags: {}\n", post.tags.join(", ")));
            }
            if !post.published {
                out.push_str("(unpublished)\n");
            }
            if !post.excerpt.is_empty() {
                out.push_str(&format!("\n{}\n", post.excerpt));
            }

            // Neighbours only exist within the published listing
            if post.published {
                let posts = folio.posts().list_published()?;
                if let Some(newer) = post.prev(&posts) {
                    out.push_str(&format!("Newer: {} [{}]\n", newer.title, newer.slug));
                }
                if let Some(older) = post.next(&posts) {
                    out.push_str(&format!("Older: {} [{}]\n", older.title, older.slug));
                }
            }

            out.push('\n');
            out.push_str(&post.content);
            Ok(out)
        }
    }
}

pub fn format_project(folio: &Folio, project: &Project, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(project),
        OutputFormat::Html => Ok(folio.renderer().render(&project.long_description)),
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&format!("{}\n", project.title));
            if !project.description.is_empty() {
                out.push_str(&format!("{}\n", project.description));
            }

            let period = match &project.end_date {
                Some(end) => format!("{} to {}", project.start_date, end),
                None => project.start_date.to_string(),
            };
            out.push_str(&format!(
                "{} · {} · {}{}\n",
                project.category,
                project.status,
                period,
                if project.featured { " · featured" } else { "" }
            ));

            if !project.technologies.is_empty() {
                out.push_str(&format!("Technologies: {}\n", project.technologies.join(", ")));
            }
            for (label, url) in [
                ("GitHub", &project.github_url),
                ("Live", &project.live_url),
                ("Image", &project.image_url),
            ] {
                if let Some(url) = url {
                    out.push_str(&format!("{}: {}\n", label, url));
                }
            }

            out.push('\n');
            out.push_str(&project.long_description);
            Ok(out)
        }
    }
}

pub fn format_cv(folio: &Folio, cv: &CvData, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(cv),
        OutputFormat::Html => Ok(folio.renderer().render(&cv_markdown(cv))),
        OutputFormat::Text => Ok(cv_markdown(cv)),
    }
}

/// Lay the CV out as a Markdown document
fn cv_markdown(cv: &CvData) -> String {
    let mut out = String::new();
    let personal = &cv.personal;

    out.push_str(&format!("# {}\n\n", personal.name));
    if !personal.title.is_empty() {
        out.push_str(&format!("**{}**\n\n", personal.title));
    }
    if !personal.summary.is_empty() {
        out.push_str(&format!("{}\n\n", personal.summary));
    }
    let contacts: Vec<&str> = [
        &personal.email,
        &personal.phone,
        &personal.location,
        &personal.website,
        &personal.github,
        &personal.linkedin,
    ]
    .into_iter()
    .map(String::as_str)
    .filter(|s| !s.is_empty())
    .collect();
    if !contacts.is_empty() {
        out.push_str(&format!("{}\n\n", contacts.join(" · ")));
    }

    if !cv.experience.is_empty() {
        out.push_str("## Experience\n\n");
        for job in &cv.experience {
            out.push_str(&format!(
                "### {}, {}\n\n{} · {} to {}\n\n",
                job.title, job.company, job.location, job.start_date, job.end_date
            ));
            for line in &job.description {
                out.push_str(&format!("- {}\n", line));
            }
            if !job.technologies.is_empty() {
                out.push_str(&format!("\n_{}_\n", job.technologies.join(", ")));
            }
            out.push('\n');
        }
    }

    if !cv.skills.is_empty() {
        out.push_str("## Skills\n\n");
        for (category, skills) in &cv.skills {
            out.push_str(&format!("- **{}**: {}\n", category, skills.join(", ")));
        }
        out.push('\n');
    }

    if !cv.education.is_empty() {
        out.push_str("## Education\n\n");
        for edu in &cv.education {
            out.push_str(&format!("- {}, {} ({})\n", edu.degree, edu.institution, edu.year));
            if let Some(details) = &edu.details {
                out.push_str(&format!("  {}\n", details));
            }
        }
        out.push('\n');
    }

    if !cv.certifications.is_empty() {
        out.push_str("## Certifications\n\n");
        for cert in &cv.certifications {
            out.push_str(&format!("- {}, {} ({})\n", cert.name, cert.issuer, cert.year));
        }
        out.push('\n');
    }

    if !cv.projects.is_empty() {
        out.push_str("## Projects\n\n");
        for project in &cv.projects {
            out.push_str(&format!("- **{}**: {}", project.name, project.description));
            if !project.technologies.is_empty() {
                out.push_str(&format!(" ({})", project.technologies.join(", ")));
            }
            out.push('\n');
        }
        out.push('\n');
    }

    if !cv.languages.is_empty() {
        out.push_str("## Languages\n\n");
        for lang in &cv.languages {
            out.push_str(&format!("- {}: {}\n", lang.language, lang.proficiency));
        }
    }

    out
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> (TempDir, Folio) {
        let dir = TempDir::new().unwrap();
        let blog = dir.path().join("content/blog");
        let projects = dir.path().join("content/projects");
        fs::create_dir_all(&blog).unwrap();
        fs::create_dir_all(&projects).unwrap();

        fs::write(
            blog.join("first.md"),
            "---\ntitle: First\ndate: 2024-01-01\ntags: [rust]\n---\nHello **there**.\n",
        )
        .unwrap();
        fs::write(
            blog.join("second.md"),
            "---\ntitle: Second\ndate: 2024-02-01\n---\nAgain.\n",
        )
        .unwrap();
        fs::write(
            projects.join("tool.md"),
            "---\ntitle: Tool\nfeatured: true\nstartDate: 2023-01-01\ngithubUrl: https://github.com/x/tool\n---\n```rust\nfn main() {}\n```\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("content/cv.md"),
            "---\npersonal:\n  name: Ada\n  email: ada@example.com\nskills:\n  Rust: [serde]\n---\n",
        )
        .unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        (dir, folio)
    }

    #[test]
    fn test_post_text() {
        let (_dir, folio) = site();
        let post = folio.posts().find_by_slug("first").unwrap().unwrap();
        let out = format_post(&folio, &post, OutputFormat::Text).unwrap();
        assert!(out.starts_with("First\n2024-01-01 · 1 min read\n"));
        assert!(out.contains("Tags: rust"));
        assert!(out.contains("Newer: Second [second]"));
        assert!(!out.contains("Older:"));
        assert!(out.ends_with("Hello **there**.\n"));
    }

    #[test]
    fn test_post_html_and_json() {
        let (_dir, folio) = site();
        let post = folio.posts().find_by_slug("first").unwrap().unwrap();

        let html = format_post(&folio, &post, OutputFormat::Html).unwrap();
        assert!(html.contains("<strong>there</strong>"));

        let json = format_post(&folio, &post, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["readTime"], "1 min read");
        assert_eq!(value["tags"][0], "rust");
    }

    #[test]
    fn test_project_text() {
        let (_dir, folio) = site();
        let project = folio.projects().find_by_slug("tool").unwrap().unwrap();
        let out = format_project(&folio, &project, OutputFormat::Text).unwrap();
        assert!(out.contains("Other · completed · 2023-01-01 · featured"));
        assert!(out.contains("GitHub: https://github.com/x/tool"));
        assert!(!out.contains("Live:"));

        let html = format_project(&folio, &project, OutputFormat::Html).unwrap();
        assert!(html.contains("language-rust"));
    }

    #[test]
    fn test_cv_text() {
        let (_dir, folio) = site();
        let cv = folio.cv().load().unwrap();
        let out = format_cv(&folio, &cv, OutputFormat::Text).unwrap();
        assert!(out.starts_with("# Ada\n"));
        assert!(out.contains("ada@example.com"));
        assert!(out.contains("- **Rust**: serde"));
        assert!(!out.contains("## Experience"));
    }

    #[test]
    fn test_missing_slug_is_an_error() {
        let (_dir, folio) = site();
        assert!(post(&folio, "nope", OutputFormat::Text).is_err());
        assert!(project(&folio, "nope", OutputFormat::Text).is_err());
    }
}
