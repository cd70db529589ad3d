//! CLI entry point for post-view

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use post_view::mapper::{ImageKind, ThumbnailPolicy};
use post_view::Site;

#[derive(Parser)]
#[command(name = "post-view")]
#[command(version)]
#[command(about = "Flattens blog content-query edges into post views", long_about = None)]
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
    /// Map query results to post views
    #[command(alias = "m")]
    Map {
        /// Query-result file or directory (overrides `source`)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (overrides `output`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Thumbnail variant: fluid, fixed or none
        #[arg(long)]
        image: Option<ImageKind>,

        /// Fail on posts without the requested thumbnail
        #[arg(long)]
        strict: bool,

        /// Print to stdout instead of writing the output file
        #[arg(long)]
        stdout: bool,
    },

    /// List site information
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Report posts with missing thumbnails or bad slugs
    Check,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "post_view=debug,info"
    } else {
        "post_view=info"
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
        Commands::Map {
            input,
            output,
            image,
            strict,
            stdout,
        } => {
            let site = Site::new(&base_dir)?;
            let mut config = site.config;
            if let Some(input) = input {
                config.source = input.to_string_lossy().into_owned();
            }
            if let Some(output) = output {
                config.output = output.to_string_lossy().into_owned();
            }
            if let Some(image) = image {
                config.image = image;
            }
            if strict {
                config.missing_thumbnail = ThumbnailPolicy::Fail;
            }

            let site = Site::with_config(base_dir, config);
            tracing::info!("Mapping posts from {:?}", site.source_path);
            post_view::commands::map::run(&site, stdout)?;
            if !stdout {
                println!("Mapped successfully!");
            }
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            post_view::commands::list::run(&site, &r#type)?;
        }

        Commands::Check => {
            let site = Site::new(&base_dir)?;
            post_view::commands::check::run(&site)?;
        }

        Commands::Version => {
            println!("post-view version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
