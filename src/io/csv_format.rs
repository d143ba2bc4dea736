//! CSV format handling for event rows and summary output
//!
//! This module centralizes all CSV format concerns, providing:
//! - Field-count and fixed-layout timestamp checks for three-column input rows
//! - Conversion from CSV rows to domain events (timestamp parsing included)
//! - Summary output serialization
//!
//! All functions are pure (no file handling) for easy testing.

use crate::types::{AttributionError, AttributionSummary, DimensionAggregate, Event, EventKind};
use chrono::NaiveDateTime;
use csv::StringRecord;
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::Write;

/// Fixed timestamp format shared by both sources (24-hour, no zone suffix)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable form of [`TIMESTAMP_FORMAT`]
pub const TIMESTAMP_LAYOUT: &str = "YYYY-MM-DD HH:MM:SS";

const TIMESTAMP_LEN: usize = TIMESTAMP_LAYOUT.len();

/// Number of fields every input row must carry
pub const FIELDS_PER_ROW: usize = 3;

/// Header row of the summary output
pub const SUMMARY_HEADER: [&str; 4] = ["dimension", "value", "num_purchases", "total_sales"];

/// Whether `text` has exactly the `YYYY-MM-DD HH:MM:SS` layout
///
/// chrono tolerates unpadded fields, signed years and leap seconds, none of
/// which the fixed format allows.
fn has_fixed_layout(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != TIMESTAMP_LEN {
        return false;
    }

    let layout_ok = bytes.iter().enumerate().all(|(idx, &b)| match idx {
        4 | 7 => b == b'-',
        10 => b == b' ',
        13 | 16 => b == b':',
        _ => b.is_ascii_digit(),
    });

    // no leap seconds
    layout_ok && bytes[17] <= b'5'
}

/// Parse a timestamp in the fixed `YYYY-MM-DD HH:MM:SS` format
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, String> {
    if !has_fixed_layout(text) {
        return Err(format!("expected layout {}", TIMESTAMP_LAYOUT));
    }
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|e| e.to_string())
}

/// Convert one raw CSV record into an Event
///
/// # Arguments
///
/// * `source_name` - Label of the source, used in error messages
/// * `kind` - Kind declared for the whole source
/// * `record` - The raw record (header already skipped)
/// * `line` - 1-based line of the record in the source
///
/// # Errors
///
/// `MalformedInput` if the field count is not exactly three or the
/// timestamp does not match [`TIMESTAMP_FORMAT`].
pub fn convert_csv_record(
    source_name: &str,
    kind: EventKind,
    record: &StringRecord,
    line: u64,
) -> Result<Event, AttributionError> {
    if record.len() != FIELDS_PER_ROW {
        return Err(AttributionError::malformed_input(
            source_name,
            Some(line),
            format!(
                "expected {} fields, found {}",
                FIELDS_PER_ROW,
                record.len()
            ),
        ));
    }

    let (user_id, timestamp, value) = (&record[0], &record[1], &record[2]);

    let timestamp = parse_timestamp(timestamp).map_err(|e| {
        AttributionError::malformed_input(
            source_name,
            Some(line),
            format!("invalid timestamp '{}': {}", timestamp, e),
        )
    })?;

    Ok(Event::new(user_id, timestamp, kind, value, line))
}

/// Render a sale total with exactly two decimal places
///
/// Midpoints round away from zero.
pub fn format_total(total: Decimal) -> String {
    let rounded = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

fn summary_row(aggregate: &DimensionAggregate) -> [String; 4] {
    [
        aggregate.key.clone(),
        aggregate.key.clone(),
        aggregate.num_purchases().to_string(),
        format_total(aggregate.total_sales),
    ]
}

/// Write the attribution summary in CSV format
///
/// Writes the header, then `overall`, then one row per dimension in key
/// order. With `include_unattributed` an `unattributed` row closes the table.
///
/// # Arguments
///
/// * `summary` - Result of the attribution pass
/// * `output` - Writer receiving the CSV text
/// * `include_unattributed` - Whether to append the unattributed row
///
/// # Errors
///
/// `SinkUnavailable` on any write or flush failure.
pub fn write_summary_csv(
    summary: &AttributionSummary,
    output: &mut dyn Write,
    include_unattributed: bool,
) -> Result<(), AttributionError> {
    let sink_error = |e: csv::Error| AttributionError::sink_unavailable("output", e);

    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(SUMMARY_HEADER).map_err(sink_error)?;
    writer
        .write_record(summary_row(&summary.overall))
        .map_err(sink_error)?;

    for dimension in &summary.dimensions {
        writer.write_record(summary_row(dimension)).map_err(sink_error)?;
    }

    if include_unattributed {
        writer
            .write_record(summary_row(&summary.unattributed.aggregate))
            .map_err(sink_error)?;
    }

    writer
        .flush()
        .map_err(|e| AttributionError::sink_unavailable("output", e))?;

    Ok(())
}
