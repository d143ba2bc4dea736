//! Aggregate types produced by the attribution pass
//!
//! A `DimensionAggregate` holds the attributed performance of one exposure
//! value. The same structure backs the reserved `overall` aggregate.

use super::error::AttributionError;
use super::event::UserId;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Key of the aggregate that accumulates every attributed sale
pub const OVERALL_KEY: &str = "overall";

/// Key of the optional report row for sales without a qualifying exposure
pub const UNATTRIBUTED_KEY: &str = "unattributed";

/// Attributed performance of a single exposure value
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionAggregate {
    /// The exposure value this aggregate is keyed by
    pub key: String,

    /// Distinct users credited to this dimension
    ///
    /// A user is counted once no matter how many sales they made.
    pub purchasers: HashSet<UserId>,

    /// Sum of attributed sale amounts
    pub total_sales: Decimal,
}

impl DimensionAggregate {
    /// Create an empty aggregate for the given key
    pub fn new(key: impl Into<String>) -> Self {
        DimensionAggregate {
            key: key.into(),
            purchasers: HashSet::new(),
            total_sales: Decimal::ZERO,
        }
    }

    /// Credit a sale to this aggregate
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the running total cannot hold the
    /// new amount. The aggregate is left untouched in that case.
    pub fn record_sale(&mut self, user_id: &str, amount: Decimal) -> Result<(), AttributionError> {
        let total = self
            .total_sales
            .checked_add(amount)
            .ok_or_else(|| AttributionError::arithmetic_overflow(&self.key))?;

        self.total_sales = total;
        if !self.purchasers.contains(user_id) {
            self.purchasers.insert(user_id.to_string());
        }
        Ok(())
    }

    /// Number of distinct purchasers (not the number of sales)
    pub fn num_purchases(&self) -> usize {
        self.purchasers.len()
    }
}

/// Sales that found no qualifying exposure for their user
///
/// `sales` is the plain counter; purchasers and total are tracked so the
/// report can optionally show them.
#[derive(Debug, Clone, PartialEq)]
pub struct UnattributedSales {
    /// Number of unattributed sale events
    pub sales: u64,

    /// Unattributed sales by users that were never exposed at all
    pub never_exposed: u64,

    /// Distinct users behind the unattributed sales plus their total
    pub aggregate: DimensionAggregate,
}

impl Default for UnattributedSales {
    fn default() -> Self {
        UnattributedSales {
            sales: 0,
            never_exposed: 0,
            aggregate: DimensionAggregate::new(UNATTRIBUTED_KEY),
        }
    }
}

impl UnattributedSales {
    /// Count a sale that found no qualifying exposure
    ///
    /// Never fails: the total saturates at `Decimal::MAX`, since these sales
    /// are excluded from every reported aggregate.
    pub fn record(&mut self, user_id: &str, amount: Decimal, never_exposed: bool) {
        self.sales += 1;
        if never_exposed {
            self.never_exposed += 1;
        }

        let aggregate = &mut self.aggregate;
        aggregate.total_sales = aggregate.total_sales.saturating_add(amount);
        if !aggregate.purchasers.contains(user_id) {
            aggregate.purchasers.insert(user_id.to_string());
        }
    }
}

/// Final result of one attribution run
#[derive(Debug, Clone, PartialEq)]
pub struct AttributionSummary {
    /// Every attributed sale regardless of dimension
    pub overall: DimensionAggregate,

    /// One aggregate per exposure value, sorted by key
    pub dimensions: Vec<DimensionAggregate>,

    /// Sales excluded from every aggregate above
    pub unattributed: UnattributedSales,
}

impl AttributionSummary {
    /// Look up a dimension by its exposure value
    pub fn dimension(&self, key: &str) -> Option<&DimensionAggregate> {
        self.dimensions
            .binary_search_by(|d| d.key.as_str().cmp(key))
            .ok()
            .map(|idx| &self.dimensions[idx])
    }
}
