//! The `refimage run` command: execute the loader and print measurements.

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

use refimage_core::{ImageSet, LoaderConfig, Measurements, RunContext, SingleImageLoader};

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the loader configuration (TOML)
    #[arg(short, long)]
    config: PathBuf,

    /// Default input folder for this run
    #[arg(long)]
    input_dir: PathBuf,

    /// Default output folder for this run (defaults to the input folder)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Run metadata as KEY=VALUE, repeatable
    #[arg(short = 'm', long = "metadata", value_parser = parse_key_value)]
    metadata: Vec<(String, String)>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))
}

/// Execute the run command.
pub fn execute(args: RunArgs) -> anyhow::Result<()> {
    let config = LoaderConfig::load_from(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.input_dir.clone());

    let mut ctx = RunContext::new(&args.input_dir, &output_dir);
    for (key, value) in args.metadata {
        ctx.set_metadata(key, value);
    }

    let loader = SingleImageLoader::new(config);
    let mut image_set = ImageSet::new();
    let mut measurements = Measurements::new();
    let summary = loader.run(&ctx, &mut image_set, &mut measurements)?;

    for (image_name, file_name) in summary.rows.iter().skip(1) {
        tracing::info!("{image_name}: {file_name}");
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&measurements)?
    } else {
        serde_json::to_string(&measurements)?
    };
    println!("{json}");
    Ok(())
}
