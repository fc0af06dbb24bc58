//! Bright-star catalog reduction tool
//!
//! Reads a HYG-style star catalog, keeps stars brighter than the magnitude
//! limit, and writes their derived colors, temperatures and radii as JSON
//! for the sky viewer.
//!
//! # Usage
//!
//! ```bash
//! # Default input/output names in the current directory
//! cargo run --release --bin bright_stars
//!
//! # Explicit paths, gzipped input, naked-eye limit of 6.0
//! cargo run --release --bin bright_stars -- -i hygdata_v41.csv.gz -o stars.json --magnitude-limit 6
//!
//! # Override model constants
//! cargo run --release --bin bright_stars -- --dump-model > model.json
//! cargo run --release --bin bright_stars -- --model model.json
//! ```
//!
//! Logging is controlled with `RUST_LOG` (defaults to `info`).

use anyhow::Context;
use clap::Parser;
use log::info;
use starcolor::pipeline::process_catalog_file;
use starcolor::shared_args::CatalogArgs;

#[derive(Parser, Debug)]
#[command(
    name = "bright_stars",
    about = "Derives display colors, temperatures and radii for bright catalog stars",
    long_about = None
)]
struct Args {
    #[command(flatten)]
    catalog: CatalogArgs,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = args
        .catalog
        .pipeline_config()
        .context("Failed to build pipeline configuration")?;

    if args.catalog.dump_model {
        println!("{}", serde_json::to_string_pretty(&config.model)?);
        return Ok(());
    }

    info!(
        "Reducing {} to stars brighter than magnitude {}",
        args.catalog.input.display(),
        config.magnitude_limit
    );

    let summary = process_catalog_file(
        &args.catalog.input,
        &args.catalog.output,
        &config,
        args.catalog.execution(),
        !args.catalog.compact,
    )
    .with_context(|| {
        format!(
            "Failed to process catalog '{}'",
            args.catalog.input.display()
        )
    })?;

    println!(
        "Processed {} stars with magnitude < {}",
        summary.kept, config.magnitude_limit
    );

    Ok(())
}
