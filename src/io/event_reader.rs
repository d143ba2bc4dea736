//! Streaming CSV reader over one labeled event source
//!
//! Provides an iterator over events from a single CSV file whose rows all
//! share one declared kind (exposures or sales). Delegates row format
//! concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! EventReader implements the Iterator trait, yielding
//! `Result<Event, AttributionError>` for each CSV row:
//!
//! ```no_run
//! use last_touch_attribution::io::event_reader::EventReader;
//! use last_touch_attribution::types::EventKind;
//! use std::path::Path;
//!
//! let reader = EventReader::new(Path::new("ad_exposures.csv"), EventKind::Exposure).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(event) => println!("{} at {}", event.user_id, event.timestamp),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Open failures are returned from `new()` as `SourceUnavailable`
//! - Row errors are yielded as Err variants, with line numbers
//! - [`load_events`] stops at the first error and discards everything read

use crate::io::csv_format::convert_csv_record;
use crate::types::{AttributionError, Event, EventKind};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::path::Path;

/// CSV reader for one event source
#[derive(Debug)]
pub struct EventReader {
    reader: csv::Reader<File>,
    record: StringRecord,
    source_name: String,
    kind: EventKind,
}

impl EventReader {
    /// Open a source for streaming iteration
    ///
    /// The CSV reader is configured to:
    /// - Skip the single header row
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts so the row check can report them itself
    ///
    /// # Errors
    ///
    /// `SourceUnavailable` if the file cannot be opened.
    pub fn new(path: &Path, kind: EventKind) -> Result<Self, AttributionError> {
        let source_name = path.display().to_string();
        let file =
            File::open(path).map_err(|e| AttributionError::source_unavailable(&source_name, e))?;

        let reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            record: StringRecord::new(),
            source_name,
            kind,
        })
    }

    /// Label used for this source in diagnostics
    pub fn source_name(&self) -> &str {
        &self.source_name
    }
}

impl Iterator for EventReader {
    type Item = Result<Event, AttributionError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                let line = self.record.position().map_or(0, |pos| pos.line());
                Some(convert_csv_record(
                    &self.source_name,
                    self.kind,
                    &self.record,
                    line,
                ))
            }
            Ok(false) => None,
            Err(e) => Some(Err(AttributionError::from_csv_read(&self.source_name, e))),
        }
    }
}

/// Load a whole source into memory in file order
///
/// # Errors
///
/// The first error encountered; no partial results are returned.
pub fn load_events(path: &Path, kind: EventKind) -> Result<Vec<Event>, AttributionError> {
    let reader = EventReader::new(path, kind)?;
    let source_name = reader.source_name().to_string();
    let events = reader.collect::<Result<Vec<_>, _>>()?;

    tracing::info!(source = %source_name, %kind, count = events.len(), "loaded events");
    Ok(events)
}
