//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (row conversion, timestamp parsing, summary serialization)
//! - `event_reader` - Streaming reader over one labeled event source

pub mod csv_format;
pub mod event_reader;

pub use csv_format::{convert_csv_record, format_total, write_summary_csv};
pub use event_reader::{load_events, EventReader};
