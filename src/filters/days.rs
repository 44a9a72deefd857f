//! Day-of-week filter.

use super::Filter;
use crate::catalog::Benefit;
use crate::engine::days;

/// Filters benefits to those valid on at least one of the selected weekdays.
///
/// Both the selection and the record days may be in either locale vocabulary;
/// comparison happens on the canonical tokens.
pub struct DayFilter {
    days: Vec<String>,
}

impl DayFilter {
    /// Creates a new day filter.
    pub fn new(days: Vec<String>) -> Self {
        Self { days }
    }
}

impl Filter for DayFilter {
    fn matches(&self, benefit: &Benefit) -> bool {
        days::any_day_matches(&self.days, &benefit.valid_days)
    }

    fn description(&self) -> String {
        format!("Days: {}", self.days.join(", "))
    }
}
