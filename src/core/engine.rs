//! Last-touch attribution engine
//!
//! This module provides the AttributionEngine that walks the merged timeline
//! once, keeping each user's latest exposure and crediting every sale to it.
//!
//! The engine enforces the attribution rules:
//! - Exposures only update per-user state, never an aggregate
//! - A sale is credited to the user's latest exposure at that point in time
//! - A sale with no exposure, or whose latest exposure is empty, is counted
//!   as unattributed and excluded from every aggregate including `overall`
//! - Any unparseable or negative amount aborts the run

use crate::core::exposure_state::{ExposureLookup, UserExposureState};
use crate::types::{
    AttributionError, AttributionSummary, DimensionAggregate, Event, EventKind, UnattributedSales,
    OVERALL_KEY,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

/// Parse a sale amount as a non-negative decimal
///
/// Accepts plain (`12.50`) and scientific (`1.25e1`) notation.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    // rust_decimal skips `_` digit separators
    if text.contains('_') {
        return None;
    }
    let amount = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()?;
    (amount >= Decimal::ZERO).then_some(amount)
}

/// Single-pass attribution engine
///
/// Owns all run state; nothing is shared between runs.
#[derive(Debug)]
pub struct AttributionEngine {
    exposures: UserExposureState,
    overall: DimensionAggregate,
    dimensions: HashMap<String, DimensionAggregate>,
    unattributed: UnattributedSales,
}

impl Default for AttributionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributionEngine {
    /// Create an engine with empty state and aggregates
    pub fn new() -> Self {
        AttributionEngine {
            exposures: UserExposureState::new(),
            overall: DimensionAggregate::new(OVERALL_KEY),
            dimensions: HashMap::new(),
            unattributed: UnattributedSales::default(),
        }
    }

    /// Process the next event on the timeline
    ///
    /// Events must be fed in timeline order.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if a sale amount is not a non-negative decimal
    /// - `ArithmeticOverflow` if a running total overflows
    pub fn process(&mut self, event: &Event) -> Result<(), AttributionError> {
        match event.kind {
            EventKind::Exposure => {
                self.exposures.record(&event.user_id, &event.payload);
                Ok(())
            }
            EventKind::Sale => self.process_sale(event),
        }
    }

    fn process_sale(&mut self, event: &Event) -> Result<(), AttributionError> {
        let amount = parse_amount(&event.payload).ok_or_else(|| {
            AttributionError::invalid_amount(&event.payload, &event.user_id, event.line)
        })?;

        let lookup = self.exposures.lookup(&event.user_id);
        let Some(key) = lookup.attributable() else {
            let never_exposed = lookup == ExposureLookup::NeverExposed;
            tracing::debug!(
                user_id = %event.user_id,
                line = event.line,
                never_exposed,
                "unattributed sale"
            );
            self.unattributed.record(&event.user_id, amount, never_exposed);
            return Ok(());
        };

        self.overall.record_sale(&event.user_id, amount)?;

        match self.dimensions.get_mut(key) {
            Some(dimension) => dimension.record_sale(&event.user_id, amount),
            None => {
                let mut dimension = DimensionAggregate::new(key);
                dimension.record_sale(&event.user_id, amount)?;
                self.dimensions.insert(key.to_string(), dimension);
                Ok(())
            }
        }
    }

    /// Number of sales excluded so far for lack of a qualifying exposure
    pub fn unattributed_sales(&self) -> u64 {
        self.unattributed.sales
    }

    /// Finish the run and produce the summary, dimensions sorted by key
    pub fn into_summary(self) -> AttributionSummary {
        let mut dimensions: Vec<DimensionAggregate> = self.dimensions.into_values().collect();
        dimensions.sort_by(|a, b| a.key.cmp(&b.key));

        AttributionSummary {
            overall: self.overall,
            dimensions,
            unattributed: self.unattributed,
        }
    }
}

/// Run the attribution pass over a whole timeline
///
/// # Errors
///
/// The first error raised by [`AttributionEngine::process`]; no partial
/// summary is produced.
pub fn attribute(timeline: &[Event]) -> Result<AttributionSummary, AttributionError> {
    let mut engine = AttributionEngine::new();
    for event in timeline {
        engine.process(event)?;
    }

    let summary = engine.into_summary();
    tracing::info!(
        events = timeline.len(),
        dimensions = summary.dimensions.len(),
        purchasers = summary.overall.num_purchases(),
        total_sales = %summary.overall.total_sales,
        unattributed_sales = summary.unattributed.sales,
        never_exposed_sales = summary.unattributed.never_exposed,
        "attribution complete"
    );
    Ok(summary)
}
