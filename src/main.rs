//! CLI entry point for blogpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blogpress")]
#[command(version)]
#[command(about = "Static build front-end for a WordPress-backed blog", long_about = None)]
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
    /// Download posts from the content API
    #[command(alias = "d")]
    Download,

    /// Print the route manifest of the downloaded posts
    Routes,

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Look up a single post by slug
    Post {
        /// Slug of the post
        slug: String,
    },

    /// Clean the public folder and downloaded posts
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, remote, route)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "blogpress=debug,info"
    } else {
        "blogpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Download => {
            let blog = blogpress::Blog::new(&base_dir)?;
            blog.download().await?;
        }

        Commands::Routes => {
            let blog = blogpress::Blog::new(&base_dir)?;
            blogpress::commands::routes::run(&blog)?;
        }

        Commands::Generate { watch } => {
            let blog = blogpress::Blog::new(&base_dir)?;
            tracing::info!("Generating static files...");

            blog.generate()?;
            println!("Generated successfully!");

            if watch {
                blogpress::commands::generate::watch(&blog)?;
            }
        }

        Commands::Post { slug } => {
            let blog = blogpress::Blog::new(&base_dir)?;
            blogpress::commands::post::run(&blog, &slug).await?;
        }

        Commands::Clean => {
            let blog = blogpress::Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let blog = blogpress::Blog::new(&base_dir)?;
            blogpress::commands::list::run(&blog, &r#type)?;
        }

        Commands::Version => {
            println!("blogpress version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
