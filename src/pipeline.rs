//! Attribution pipeline
//!
//! Orchestrates one batch run: load both sources, merge them into a single
//! timeline, walk it once for attribution, then emit the summary. Each stage
//! finishes (and releases its files) before the next one starts.
//!
//! The pipeline delegates:
//! - CSV parsing to `io::event_reader` (one source at a time)
//! - Ordering to `core::timeline::merge_timeline`
//! - Business rules to `core::engine::AttributionEngine`
//! - Output to `io::csv_format::write_summary_csv`
//!
//! # Output Atomicity
//!
//! [`run`] renders the summary into a temporary file next to the destination
//! and renames it into place only after the whole table has been written and
//! flushed. Any failure before that leaves no summary file behind.

use crate::core::{attribute, merge_timeline};
use crate::io::csv_format::write_summary_csv;
use crate::io::event_reader::load_events;
use crate::types::{AttributionError, AttributionSummary, EventKind};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default exposure source path
pub const DEFAULT_EXPOSURES_PATH: &str = "ad_exposures.csv";

/// Default sale source path
pub const DEFAULT_SALES_PATH: &str = "sales_data.csv";

/// Default summary output path
pub const DEFAULT_OUTPUT_PATH: &str = "summary.csv";

/// Configuration for a single attribution run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// CSV file with `(user_id, timestamp, exposure_value)` rows
    pub exposures_path: PathBuf,

    /// CSV file with `(user_id, timestamp, sale_amount)` rows
    pub sales_path: PathBuf,

    /// Destination of the summary table
    pub output_path: PathBuf,

    /// Append an `unattributed` row to the summary
    pub include_unattributed: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            exposures_path: PathBuf::from(DEFAULT_EXPOSURES_PATH),
            sales_path: PathBuf::from(DEFAULT_SALES_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            include_unattributed: false,
        }
    }
}

/// Load, merge and attribute both sources without writing anything
///
/// Exposures are concatenated ahead of sales, so an exposure and a sale at
/// the same instant resolve with the exposure first.
pub fn summarize(exposures_path: &Path, sales_path: &Path) -> Result<AttributionSummary, AttributionError> {
    let exposures = load_events(exposures_path, EventKind::Exposure)?;
    let sales = load_events(sales_path, EventKind::Sale)?;

    let timeline = merge_timeline(exposures, sales);
    attribute(&timeline)
}

/// Run the pipeline and write the summary to an arbitrary writer
///
/// The summary is only written once attribution has fully succeeded.
pub fn process(config: &RunConfig, output: &mut dyn Write) -> Result<AttributionSummary, AttributionError> {
    let summary = summarize(&config.exposures_path, &config.sales_path)?;
    write_summary_csv(&summary, output, config.include_unattributed)?;
    Ok(summary)
}

/// Run the pipeline and atomically write the summary to `config.output_path`
///
/// # Errors
///
/// Any load, attribution or write error. In every error case the
/// destination file is left as it was (absent if it did not exist).
pub fn run(config: &RunConfig) -> Result<AttributionSummary, AttributionError> {
    let summary = summarize(&config.exposures_path, &config.sales_path)?;

    let sink_name = config.output_path.display().to_string();
    let sink_error = |message: String| AttributionError::sink_unavailable(&sink_name, message);

    let directory = match config.output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(directory).map_err(|e| sink_error(e.to_string()))?;

    write_summary_csv(&summary, &mut staged, config.include_unattributed).map_err(|e| match e {
        AttributionError::SinkUnavailable { message, .. } => sink_error(message),
        other => other,
    })?;
    staged.as_file().sync_all().map_err(|e| sink_error(e.to_string()))?;
    staged
        .persist(&config.output_path)
        .map_err(|e| sink_error(e.error.to_string()))?;

    tracing::info!(
        output = %sink_name,
        rows = summary.dimensions.len() + 1,
        unattributed_sales = summary.unattributed.sales,
        "summary written"
    );
    Ok(summary)
}
