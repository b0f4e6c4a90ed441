//! xmdoc CLI - Markdown documentation generator for .NET assemblies.
//!
//! Provides commands for:
//! - `generate`: Render Markdown pages from an assembly metadata artifact
//!   and its XML documentation comments, reconciling an output directory

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::GenerateArgs;
use output::Output;

/// xmdoc - Markdown documentation generator.
#[derive(Parser)]
#[command(name = "xmdoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Markdown documentation into an output directory.
    Generate(GenerateArgs),
}

fn main() {
    let cli = Cli::parse();

    let (quiet, verbose) = match &cli.command {
        Commands::Generate(args) => (args.quiet, args.verbose),
    };
    let output = Output::new(quiet);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Generate(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
