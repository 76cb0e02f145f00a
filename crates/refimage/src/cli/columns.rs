//! The `refimage columns` command: print the measurement column schema.

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

use refimage_core::{LoaderConfig, SingleImageLoader};

/// Arguments for the `columns` command.
#[derive(Args, Debug)]
pub struct ColumnsArgs {
    /// Path to the loader configuration (TOML)
    #[arg(short, long)]
    config: PathBuf,
}

/// Execute the columns command.
pub fn execute(args: ColumnsArgs) -> anyhow::Result<()> {
    let config = LoaderConfig::load_from(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    let loader = SingleImageLoader::new(config);
    let columns = loader.measurement_columns();
    println!("{}", serde_json::to_string_pretty(&columns)?);
    Ok(())
}
