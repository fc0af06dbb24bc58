use crate::config::{ModelConfig, PipelineConfig, DEFAULT_MAGNITUDE_LIMIT};
use crate::error::CatalogError;
use crate::pipeline::Execution;
use clap::Parser;
use std::path::PathBuf;

/// Parse a magnitude limit, rejecting values that cannot filter anything sensibly
fn parse_magnitude_limit(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid magnitude value: {s}"))?;

    if !value.is_finite() {
        return Err("Magnitude limit must be finite".to_string());
    }

    Ok(value)
}

/// Parse a worker thread count; zero is rejected
fn parse_threads(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("Thread count must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Invalid thread count: {s}")),
    }
}

/// Arguments controlling a catalog reduction run
#[derive(Parser, Debug, Clone)]
pub struct CatalogArgs {
    /// Input catalog (CSV, optionally gzip-compressed)
    #[arg(long, short, default_value = "hygdata_v41.csv")]
    pub input: PathBuf,

    /// Output JSON file
    #[arg(long, short, default_value = "bright_stars.json")]
    pub output: PathBuf,

    /// Keep stars strictly brighter than this apparent magnitude
    #[arg(long, default_value_t = DEFAULT_MAGNITUDE_LIMIT, value_parser = parse_magnitude_limit, allow_negative_numbers = true)]
    pub magnitude_limit: f64,

    /// JSON file overriding model constants (missing keys keep their defaults)
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Write compact JSON instead of indented output
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Process rows on a single thread
    #[arg(long, default_value_t = false, conflicts_with = "threads")]
    pub sequential: bool,

    /// Size of a dedicated worker pool (defaults to one worker per core)
    #[arg(long, value_parser = parse_threads)]
    pub threads: Option<usize>,

    /// Print the effective model constants as JSON and exit
    #[arg(long, default_value_t = false)]
    pub dump_model: bool,
}

impl CatalogArgs {
    pub fn execution(&self) -> Execution {
        match (self.sequential, self.threads) {
            (true, _) => Execution::Sequential,
            (false, Some(n)) => Execution::ParallelWith(n),
            (false, None) => Execution::Parallel,
        }
    }

    /// Build the pipeline configuration, loading the model file if given
    pub fn pipeline_config(&self) -> Result<PipelineConfig, CatalogError> {
        let model = match &self.model {
            Some(path) => {
                log::info!("Loading model constants from {}", path.display());
                ModelConfig::load_from_file(path)?
            }
            None => ModelConfig::default(),
        };

        Ok(PipelineConfig::default()
            .with_magnitude_limit(self.magnitude_limit)
            .with_model(model))
    }
}
