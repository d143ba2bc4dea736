//! Last-Touch Attribution Library
//! # Overview
//!
//! This library credits each sale to the most recent ad exposure its user
//! received before the sale, then aggregates results per exposure value.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Event, DimensionAggregate, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`io`] - CSV loading of the two event sources and summary output
//! - [`core`] - Business logic components:
//!   - [`core::timeline`] - Stable chronological merge of both sources
//!   - [`core::exposure_state`] - Per-user last-seen exposure
//!   - [`core::engine`] - Single-pass attribution and aggregation
//! - [`pipeline`] - Load, merge, attribute, emit
//!
//! # Attribution Rules
//!
//! - **Exposure**: overwrites the user's last-seen exposure
//! - **Sale**: credited to the user's last-seen exposure and to `overall`;
//!   unattributed when the user has no exposure yet or the latest one is empty
//!
//! # Summary Columns
//!
//! - `dimension` / `value`: the exposure value (`overall` for the total row)
//! - `num_purchases`: distinct purchasers, not number of sales
//! - `total_sales`: attributed amount with two decimal places

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use crate::core::{attribute, merge_timeline, AttributionEngine, UserExposureState};
pub use crate::io::{load_events, write_summary_csv};
pub use pipeline::{run, RunConfig};
pub use types::{
    AttributionError, AttributionSummary, DimensionAggregate, Event, EventKind, UnattributedSales,
    UserId,
};
