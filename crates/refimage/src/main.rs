//! Refimage CLI - host harness for the single-image loader.
//!
//! The loader itself is a library invoked by a pipeline engine; this binary
//! is the reference host. It builds a run context from arguments, executes
//! the loader against a TOML configuration, and prints the recorded
//! measurements as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Load the configured images and print measurements
//! refimage run --config loader.toml --input-dir ./images -m Plate=P01
//!
//! # Show the measurement column schema for a configuration
//! refimage columns --config loader.toml
//!
//! # Upgrade a serialized value list to the current revision
//! refimage migrate --revision 4 --legacy -- "" "." illum.tif IllumBlue
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Refimage - load single reference images for an analysis run.
#[derive(Parser, Debug)]
#[command(name = "refimage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the configured images and print the recorded measurements
    Run(cli::run::RunArgs),

    /// Print the measurement column schema for a configuration
    Columns(cli::columns::ColumnsArgs),

    /// Migrate serialized setting values to the current revision
    Migrate(cli::migrate::MigrateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json_logs);

    tracing::debug!("refimage v{}", refimage_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Run(args) => cli::run::execute(args),
        Commands::Columns(args) => cli::columns::execute(args),
        Commands::Migrate(args) => cli::migrate::execute(args),
    }
}
