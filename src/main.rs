//! CLI entry point for spacetraveling

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spacetraveling::commands::list::PageLimit;

#[derive(Parser)]
#[command(name = "spacetraveling")]
#[command(version)]
#[command(about = "Read posts from a Prismic-backed blog", long_about = None)]
struct Cli {
    /// Set the site directory holding _config.yml (defaults to current directory)
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
    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Number of extra pages to load after the first one
        #[arg(short, long, default_value = "0", conflicts_with = "all")]
        pages: usize,

        /// Load every page
        #[arg(short, long)]
        all: bool,
    },

    /// Show a single post with its reading time
    Post {
        /// Post slug
        slug: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "spacetraveling=debug,info"
    } else {
        "spacetraveling=info"
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
        Commands::List { pages, all } => {
            let blog = spacetraveling::Blog::new(&base_dir)?;
            let limit = if all {
                PageLimit::All
            } else {
                PageLimit::Pages(pages)
            };
            spacetraveling::commands::list::run(&blog, limit).await?;
        }

        Commands::Post { slug } => {
            let blog = spacetraveling::Blog::new(&base_dir)?;
            tracing::info!("Fetching post {}", slug);
            spacetraveling::commands::post::run(&blog, &slug).await?;
        }

        Commands::Version => {
            println!("spacetraveling version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
