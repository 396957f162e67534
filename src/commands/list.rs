//! List site content

use anyhow::Result;
use std::collections::BTreeMap;

use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = folio.posts().list_published()?;
            if posts.is_empty() {
                println!("No posts yet.");
                return Ok(());
            }
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} ({}) [{}]",
                    display_date(post.date.as_str()),
                    post.title,
                    post.read_time,
                    post.slug
                );
            }
        }
        "project" | "projects" => {
            let projects = folio.projects().list_all()?;
            if projects.is_empty() {
                println!("No projects yet.");
                return Ok(());
            }
            println!("Projects ({}):", projects.len());
            for project in projects {
                println!(
                    "  {}{} - {} <{}> [{}]",
                    if project.featured { "* " } else { "" },
                    display_date(project.start_date.as_str()),
                    project.title,
                    project.status,
                    project.slug
                );
            }
        }
        "tag" | "tags" => {
            let posts = folio.posts().list_published()?;
            let mut tags: BTreeMap<&str, usize> = BTreeMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.as_str()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let groups = folio.projects().group_by_category()?;
            let categories = folio.projects().list_categories()?;
            println!("Categories ({}):", categories.len());
            for category in &categories {
                let count = groups.get(category).map(Vec::len).unwrap_or(0);
                println!("  {} ({})", category, count);
            }
        }
        "group" | "groups" => {
            let groups = folio.projects().group_by_category()?;
            for (category, projects) in groups {
                println!("{} ({}):", category, projects.len());
                for project in projects {
                    println!("  {} [{}]", project.title, project.slug);
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, projects, tags, categories, groups",
                content_type
            );
        }
    }

    Ok(())
}

fn display_date(date: &str) -> &str {
    if date.is_empty() {
        "(undated)"
    } else {
        date
    }
}
