//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::commands::new::EntryKind;
use folio_rs::commands::show::{self, OutputFormat};

#[derive(Parser)]
#[command(name = "folio")]
#[command(author = "Yukang Chen")]
#[command(version)]
#[command(about = "Read and manage Markdown content for a portfolio site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post or project
    New {
        /// Kind of entry to create
        #[arg(value_enum)]
        kind: EntryKind,

        /// Title of the new entry
        title: String,

        /// File name to use instead of the slugified title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// List site content
    #[command(alias = "ls")]
    List {
        /// Type of content to list (posts, projects, tags, categories, groups)
        #[arg(default_value = "posts")]
        r#type: String,
    },

    /// Show a single entry
    Show {
        #[command(subcommand)]
        target: ShowTarget,
    },

    /// Display version information
    Version,
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show a blog post
    Post {
        slug: String,

        /// Render the body to HTML
        #[arg(long, conflicts_with = "json")]
        html: bool,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a project
    Project {
        slug: String,

        /// Render the body to HTML
        #[arg(long, conflicts_with = "json")]
        html: bool,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the CV
    Cv {
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
}

fn output_format(html: bool, json: bool) -> OutputFormat {
    if json {
        OutputFormat::Json
    } else if html {
        OutputFormat::Html
    } else {
        OutputFormat::Text
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { kind, title, slug } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Creating new {:?} with title: {}", kind, title);
            let path = folio.new_entry(kind, &title, slug.as_deref())?;
            println!("Created {:?}", path);
        }

        Commands::List { r#type } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::list::run(&folio, &r#type)?;
        }

        Commands::Show { target } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            match target {
                ShowTarget::Post { slug, html, json } => {
                    show::post(&folio, &slug, output_format(html, json))?
                }
                ShowTarget::Project { slug, html, json } => {
                    show::project(&folio, &slug, output_format(html, json))?
                }
                ShowTarget::Cv { json } => show::cv(&folio, output_format(false, json))?,
            }
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
