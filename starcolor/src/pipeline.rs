//! Per-star derivation and batch drivers.
//!
//! Each catalog row is handled independently: parse the magnitude, drop faint
//! or unparseable rows, then run the color pipeline and the radius estimate.
//! The batch drivers differ only in how rows are scheduled; sequential and
//! parallel runs produce identical output in input order.

use std::fmt;
use std::io::Read;
use std::path::Path;

use log::{debug, info};
use rayon::prelude::*;

use crate::catalog::{fields, load_catalog, save_records, CatalogReader, CatalogRow, StarRecord};
use crate::config::PipelineConfig;
use crate::error::CatalogError;

/// What happened to a single catalog row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Kept(Box<StarRecord>),
    /// Magnitude at or above the limit
    Faint,
    /// Magnitude missing or malformed
    Unparseable,
}

/// Counts from one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub rows: usize,
    pub kept: usize,
    pub filtered_faint: usize,
    pub skipped_unparseable: usize,
}

impl PipelineSummary {
    fn record(&mut self, outcome: &RowOutcome) {
        self.rows += 1;
        match outcome {
            RowOutcome::Kept(_) => self.kept += 1,
            RowOutcome::Faint => self.filtered_faint += 1,
            RowOutcome::Unparseable => self.skipped_unparseable += 1,
        }
    }
}

impl fmt::Display for PipelineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows: {} kept, {} too faint, {} without magnitude",
            self.rows, self.kept, self.filtered_faint, self.skipped_unparseable
        )
    }
}

/// How batch work is scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Execution {
    Sequential,
    /// Rayon parallel map, on the global pool or a dedicated pool of this size
    #[default]
    Parallel,
    ParallelWith(usize),
}

/// Classify one row and derive its record if it survives the filter.
pub fn classify_row(row: &CatalogRow, config: &PipelineConfig) -> RowOutcome {
    let Some(mag) = row.real(fields::MAG) else {
        return RowOutcome::Unparseable;
    };
    if !config.accepts(mag) {
        return RowOutcome::Faint;
    }

    let model = &config.model;
    let spect = row.text(fields::SPECT);

    // Non-finite indices take the out-of-range fallback rather than the missing one
    let estimate = model.color_index.estimate_raw(row.text(fields::CI));
    let atmospheric_color = model.atmosphere.adjust_hex(estimate.rgb, mag);
    let size = model
        .radius
        .estimate(spect, estimate.temperature, row.real(fields::LUM));

    let variable = row.is_set(fields::VAR);
    let (var_min, var_max) = match (row.real(fields::VAR_MIN), row.real(fields::VAR_MAX)) {
        (Some(min), Some(max)) if variable => (Some(min), Some(max)),
        _ => (None, None),
    };

    let record = StarRecord {
        id: row.text(fields::PROPER).to_string(),
        mag,
        x: row.real(fields::X),
        y: row.real(fields::Y),
        z: row.real(fields::Z),
        color: estimate.rgb.to_hex(),
        atmospheric_color,
        temperature: estimate.temperature as i64,
        spect: spect.to_string(),
        ci: row.text(fields::CI).to_string(),
        hip: row.digits(fields::HIP),
        size,
        dist: row.real_or(fields::DIST, 0.0),
        ra: row.real_or(fields::RA, 0.0),
        dec: row.real_or(fields::DEC, 0.0),
        lum: row.real(fields::LUM),
        absmag: row.real(fields::ABSMAG),
        con: row.text(fields::CON).to_string(),
        vx: row.real(fields::VX),
        vy: row.real(fields::VY),
        vz: row.real(fields::VZ),
        bayer: row.text(fields::BAYER).to_string(),
        flam: row.text(fields::FLAM).to_string(),
        variable,
        var_min,
        var_max,
    };

    debug!(
        "{} mag {mag}: {}K {} -> {}, radius {}",
        record.id, record.temperature, record.color, record.atmospheric_color, record.size
    );

    RowOutcome::Kept(Box::new(record))
}

/// Derive the output record for a row, or `None` if the row is filtered out.
pub fn derive_star(row: &CatalogRow, config: &PipelineConfig) -> Option<StarRecord> {
    match classify_row(row, config) {
        RowOutcome::Kept(record) => Some(*record),
        _ => None,
    }
}

fn collect_outcomes(outcomes: Vec<RowOutcome>) -> (Vec<StarRecord>, PipelineSummary) {
    let mut summary = PipelineSummary::default();
    let mut records = Vec::new();

    for outcome in outcomes {
        summary.record(&outcome);
        if let RowOutcome::Kept(record) = outcome {
            records.push(*record);
        }
    }

    (records, summary)
}

/// Derive records for a batch of rows, one at a time.
pub fn derive_catalog(
    rows: &[CatalogRow],
    config: &PipelineConfig,
) -> (Vec<StarRecord>, PipelineSummary) {
    collect_outcomes(rows.iter().map(|row| classify_row(row, config)).collect())
}

/// Derive records for a batch of rows across rayon workers.
///
/// Output order matches input order.
pub fn derive_catalog_parallel(
    rows: &[CatalogRow],
    config: &PipelineConfig,
) -> (Vec<StarRecord>, PipelineSummary) {
    collect_outcomes(
        rows.par_iter()
            .map(|row| classify_row(row, config))
            .collect(),
    )
}

/// Derive records using the requested scheduling.
pub fn run(
    rows: &[CatalogRow],
    config: &PipelineConfig,
    execution: Execution,
) -> Result<(Vec<StarRecord>, PipelineSummary), CatalogError> {
    match execution {
        Execution::Sequential => Ok(derive_catalog(rows, config)),
        Execution::Parallel => Ok(derive_catalog_parallel(rows, config)),
        Execution::ParallelWith(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?;
            Ok(pool.install(|| derive_catalog_parallel(rows, config)))
        }
    }
}

/// Derive records while streaming rows from a reader.
///
/// Only surviving records are held in memory.
pub fn derive_stream<R: Read>(
    reader: CatalogReader<R>,
    config: &PipelineConfig,
) -> Result<(Vec<StarRecord>, PipelineSummary), CatalogError> {
    let mut summary = PipelineSummary::default();
    let mut records = Vec::new();

    for row in reader {
        let outcome = classify_row(&row?, config);
        summary.record(&outcome);
        if let RowOutcome::Kept(record) = outcome {
            records.push(*record);
        }
    }

    Ok((records, summary))
}

/// Read a catalog file, derive bright-star records and write them as JSON.
pub fn process_catalog_file(
    input: &Path,
    output: &Path,
    config: &PipelineConfig,
    execution: Execution,
    pretty: bool,
) -> Result<PipelineSummary, CatalogError> {
    let rows = load_catalog(input)?;
    let (records, summary) = run(&rows, config, execution)?;

    info!("{summary}");
    save_records(output, &records, pretty)?;

    Ok(summary)
}
