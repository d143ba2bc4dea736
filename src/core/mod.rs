//! Core business logic module
//!
//! This module contains the attribution components:
//! - `timeline` - Stable chronological merge of the two event sources
//! - `exposure_state` - Per-user last-seen exposure tracking
//! - `engine` - Single-pass last-touch attribution and aggregation

pub mod engine;
pub mod exposure_state;
pub mod timeline;

pub use engine::{attribute, parse_amount, AttributionEngine};
pub use exposure_state::{ExposureLookup, UserExposureState};
pub use timeline::merge_timeline;
