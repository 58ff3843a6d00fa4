//! CLI entry point for ordinary-posts

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ordinary-posts")]
#[command(version)]
#[command(about = "Render, list and serve the team's Markdown posts", long_about = None)]
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
    /// List all posts
    #[command(alias = "ls")]
    List,

    /// Render a single post
    Show {
        /// Post id (the number in page_<id>.md)
        id: String,

        /// Print the page title and description instead of the content
        #[arg(short, long)]
        meta: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Author line to add below the title
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Export posts as JSON into the public folder
    #[command(alias = "g")]
    Generate,

    /// Start the content server
    #[command(alias = "s")]
    Server {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured address)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "ordinary_posts=debug,tower_http=debug,info"
    } else {
        "ordinary_posts=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List => {
            let site = ordinary_posts::Site::new(&base_dir)?;
            ordinary_posts::commands::list::run(&site)?;
        }

        Commands::Show { id, meta } => {
            let site = ordinary_posts::Site::new(&base_dir)?;
            ordinary_posts::commands::show::run(&site, &id, meta)?;
        }

        Commands::New { title, author } => {
            let site = ordinary_posts::Site::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            site.new_post(&title, author.as_deref())?;
        }

        Commands::Generate => {
            let site = ordinary_posts::Site::new(&base_dir)?;
            tracing::info!("Exporting posts...");
            site.generate()?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let site = ordinary_posts::Site::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());
            let port = port.unwrap_or(site.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            ordinary_posts::server::start(&site, &ip, port).await?;
        }

        Commands::Clean => {
            let site = ordinary_posts::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("ordinary-posts version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
