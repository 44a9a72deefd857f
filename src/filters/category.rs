//! Category filter.

use super::Filter;
use crate::catalog::Benefit;

/// Filters benefits to one exact category.
///
/// Comparison is case-sensitive: the category vocabulary is fixed and the
/// filter value comes from that same vocabulary, not from free text.
pub struct CategoryFilter {
    category: String,
}

impl CategoryFilter {
    /// Creates a new category filter.
    pub fn new(category: impl Into<String>) -> Self {
        Self { category: category.into() }
    }
}

impl Filter for CategoryFilter {
    fn matches(&self, benefit: &Benefit) -> bool {
        benefit.category == self.category
    }

    fn description(&self) -> String {
        format!("Category: {}", self.category)
    }
}
