//! fieldmap CLI - Command-line interface for knowledge-domain network maps
//!
//! Turns CSV tables of fields, subfields, authors and works into an
//! interactive HTML network.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod constants;
mod output;

use commands::*;
use config::FieldmapConfig;
use output::OutputFormat;

/// Interactive network maps of a knowledge domain.
#[derive(Parser)]
#[command(name = "fieldmap")]
#[command(author, version)]
#[command(about = "Interactive network maps of a knowledge domain")]
#[command(
    long_about = "fieldmap reads CSV tables of fields, subfields, authors and works,\nbuilds a graph of their relationships and exports an interactive HTML network."
)]
#[command(propagate_version = true)]
#[command(after_help = "Input tables:
  nodes     Label,Type                  (Type: Field, Subfield, Author, Work)
  edges     Source,Target,Relationship
  authors   Subfield,Author,Work        (Subfield may be empty)

Examples:
  fieldmap build                     Build philosophy_extended_network.html
  fieldmap build -o map.html         Build to a custom path
  fieldmap publish --publish-dir docs
  fieldmap stats --format json")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the interactive HTML network
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output HTML file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build, then mirror static assets into a publish directory
    Publish {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output HTML file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Static assets directory to mirror
        #[arg(long)]
        assets: Option<PathBuf>,

        /// Directory served by the static host
        #[arg(long)]
        publish_dir: Option<PathBuf>,
    },

    /// Show node, edge and category counts
    #[command(visible_alias = "st")]
    Stats {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .fieldmaprc.toml
    let config = FieldmapConfig::load(std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Build { inputs, output } => {
            build::run(&inputs, output, &config, format, cli.quiet)
        }
        Commands::Publish {
            inputs,
            output,
            assets,
            publish_dir,
        } => publish::run(
            &inputs,
            output,
            assets,
            publish_dir,
            &config,
            format,
            cli.quiet,
        ),
        Commands::Stats { inputs } => stats::run(&inputs, &config, format),
    }
}
