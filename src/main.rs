//! CLI entry point for blogroll

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogroll::search::PostFilter;

#[derive(Parser)]
#[command(name = "blogroll")]
#[command(version)]
#[command(about = "Aggregate local and remote markdown posts into one searchable feed", long_about = None)]
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

    /// Create a new local post
    New {
        /// Title of the new post
        title: String,

        /// Author recorded in the front-matter
        #[arg(short, long)]
        author: Option<String>,

        /// Tag to add (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List posts, tags or authors
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, tag, author)
        #[arg(default_value = "post")]
        r#type: String,

        /// Extra local pages to load beyond the first
        #[arg(short, long, default_value = "0")]
        pages: usize,
    },

    /// Search and filter posts
    Search {
        /// Text matched against title, author, tags and excerpt
        #[arg(default_value = "")]
        query: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Extra local pages to load beyond the first
        #[arg(short, long, default_value = "0")]
        pages: usize,
    },

    /// Export posts as an RSS 2.0 feed
    Feed {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Extra local pages to load beyond the first
        #[arg(short, long, default_value = "0")]
        pages: usize,
    },

    /// Display one post and count a view
    Show {
        /// Post slug
        slug: String,

        /// Extra local pages to load beyond the first
        #[arg(short, long, default_value = "0")]
        pages: usize,
    },

    /// Show or bump a post's view counter
    Views {
        /// Post slug
        slug: String,

        /// Count one more view first
        #[arg(short, long)]
        increment: bool,
    },

    /// Display version information
    Version,
}

#[derive(Args)]
struct FilterArgs {
    /// Required tag (repeatable, all must match)
    #[arg(short, long = "tag")]
    tags: Vec<String>,

    /// Author substring
    #[arg(short, long, default_value = "")]
    author: String,

    /// Earliest date (inclusive)
    #[arg(long, value_parser = parse_date_arg)]
    from: Option<DateTime<Utc>>,

    /// Latest date (inclusive)
    #[arg(long, value_parser = parse_date_arg)]
    to: Option<DateTime<Utc>>,
}

impl FilterArgs {
    fn into_filter(self, query: String) -> PostFilter {
        PostFilter {
            query,
            tags: self.tags,
            author: self.author,
            from: self.from,
            to: self.to,
        }
    }
}

fn parse_date_arg(s: &str) -> Result<DateTime<Utc>, String> {
    blogroll::content::parse_date(s).ok_or_else(|| format!("unrecognized date: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging on stderr so feed output stays clean
    let filter = if cli.debug {
        "blogroll=debug,info"
    } else {
        "blogroll=info"
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
            blogroll::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            title,
            author,
            tags,
        } => {
            let app = blogroll::Blogroll::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            blogroll::commands::new::run(&app, &title, author.as_deref(), &tags)?;
        }

        Commands::List { r#type, pages } => {
            let app = blogroll::Blogroll::new(&base_dir)?;
            blogroll::commands::list::run(&app, &r#type, pages).await?;
        }

        Commands::Search {
            query,
            filter,
            pages,
        } => {
            let app = blogroll::Blogroll::new(&base_dir)?;
            let filter = filter.into_filter(query);
            blogroll::commands::search::run(&app, &filter, pages).await?;
        }

        Commands::Feed {
            output,
            filter,
            pages,
        } => {
            let app = blogroll::Blogroll::new(&base_dir)?;
            let filter = filter.into_filter(String::new());
            blogroll::commands::feed::run(&app, &filter, pages, output.as_deref()).await?;
        }

        Commands::Show { slug, pages } => {
            let app = blogroll::Blogroll::new(&base_dir)?;
            blogroll::commands::show::run(&app, &slug, pages).await?;
        }

        Commands::Views { slug, increment } => {
            let app = blogroll::Blogroll::new(&base_dir)?;
            blogroll::commands::views::run(&app, &slug, increment)?;
        }

        Commands::Version => {
            println!("blogroll version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
