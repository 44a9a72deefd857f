//! Minimum-discount filter.

use super::Filter;
use crate::catalog::Benefit;
use crate::engine::discount;

/// Filters benefits to those with a parseable percentage at or above a floor.
///
/// Labels without a parseable percentage ("$5 OFF", "2x1") never pass: a
/// threshold on a percentage cannot be satisfied by a label that has none.
pub struct DiscountFilter {
    min_percent: u32,
}

impl DiscountFilter {
    /// Creates a new discount filter.
    pub fn new(min_percent: u32) -> Self {
        Self { min_percent }
    }
}

impl Filter for DiscountFilter {
    fn matches(&self, benefit: &Benefit) -> bool {
        match discount::parse_percent(&benefit.discount) {
            Some(percent) => percent >= self.min_percent,
            None => false,
        }
    }

    fn description(&self) -> String {
        format!("Discount: >= {}%", self.min_percent)
    }
}
