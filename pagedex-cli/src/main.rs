//! # pagedex CLI
//!
//! Command-line interface for the pagedex search index builder.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pagedex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (defaults to pagedex.yml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new pagedex project
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Build the search index
    Build {
        /// Content directory (overrides paths.content)
        #[arg(long)]
        content: Option<PathBuf>,

        /// Output file (overrides paths.output)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Index the content without writing and report diagnostics
    Verify {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Exit with an error when any error diagnostic is found
        #[arg(long)]
        strict: bool,
    },

    /// Search the written index
    Search {
        /// Search query
        query: String,

        /// Maximum results to return
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Filter by tags (comma separated)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Build {
            content,
            output,
            pretty,
        } => {
            let overrides = commands::BuildOverrides {
                content,
                output,
                pretty,
            };
            commands::build_index(config, overrides)
        }
        Commands::Verify { json, strict } => commands::verify_index(config, json, strict),
        Commands::Search {
            query,
            limit,
            tags,
            json,
        } => {
            let opts = commands::SearchCommandOptions { limit, tags, json };
            commands::search_index(config, &query, opts)
        }
    }
}
