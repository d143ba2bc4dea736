//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `event`: Unified exposure/sale event representation
//! - `aggregate`: Per-dimension aggregates and the run summary
//! - `error`: Error types for the attribution engine

pub mod aggregate;
pub mod error;
pub mod event;

pub use aggregate::{
    AttributionSummary, DimensionAggregate, UnattributedSales, OVERALL_KEY, UNATTRIBUTED_KEY,
};
pub use error::AttributionError;
pub use event::{Event, EventKind, UserId};
