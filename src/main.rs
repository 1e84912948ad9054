//! CLI entry point for plumber-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "plumber-rs")]
#[command(author = "Yukang Chen")]
#[command(version = "0.1.0")]
#[command(about = "A marketing site server for local plumbing businesses", long_about = None)]
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
    /// Initialize a new site with demo content
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new draft article
    New {
        /// Title of the new article
        title: String,

        /// Article category
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Article author
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Start the site server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured address)
        #[arg(short, long)]
        ip: Option<String>,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// List site content
    List {
        /// Type of content to list (service, area, article, page, faq, media, contact)
        #[arg(default_value = "service")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "plumber_rs=debug,info"
    } else {
        "plumber_rs=info"
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
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            plumber_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            title,
            category,
            author,
        } => {
            let site = plumber_rs::Site::new(&base_dir)?;
            tracing::info!("Creating new article with title: {}", title);
            site.new_article(&title, category.as_deref(), author.as_deref())
                .await?;
        }

        Commands::Serve { port, ip, open } => {
            let site = plumber_rs::Site::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());
            let port = port.unwrap_or(site.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            plumber_rs::server::start(&site, &ip, port, open).await?;
        }

        Commands::List { r#type } => {
            let site = plumber_rs::Site::new(&base_dir)?;
            plumber_rs::commands::list::run(&site, &r#type).await?;
        }

        Commands::Version => {
            println!("plumber-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
