//! Benefit filtering system with composable filters.

pub mod active;
pub mod category;
pub mod days;
pub mod discount;

use crate::catalog::Benefit;
use chrono::{DateTime, Utc};

pub use active::ActiveFilter;
pub use category::CategoryFilter;
pub use days::DayFilter;
pub use discount::DiscountFilter;

/// Trait for filtering benefits.
pub trait Filter: Send + Sync {
    /// Returns true if the benefit passes the filter.
    fn matches(&self, benefit: &Benefit) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a benefit passes all filters.
    pub fn matches(&self, benefit: &Benefit) -> bool {
        self.filters.iter().all(|f| f.matches(benefit))
    }

    /// Filters a collection of benefits, preserving input order.
    pub fn apply(&self, benefits: Vec<Benefit>) -> Vec<Benefit> {
        benefits.into_iter().filter(|b| self.matches(b)).collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from criteria fields.
///
/// Each method adds its filter only when the corresponding criterion is
/// actually constrained, so unconstrained criteria produce an empty chain.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Adds an exact-category filter.
    pub fn category(mut self, category: Option<String>) -> Self {
        if let Some(category) = category {
            self.chain.add(CategoryFilter::new(category));
        }
        self
    }

    /// Adds an expiry filter pinned to `now`.
    pub fn active_only(mut self, enabled: bool, now: DateTime<Utc>) -> Self {
        if enabled {
            self.chain.add(ActiveFilter::new(now));
        }
        self
    }

    /// Adds a day-of-week filter.
    pub fn days(mut self, days: Vec<String>) -> Self {
        if !days.is_empty() {
            self.chain.add(DayFilter::new(days));
        }
        self
    }

    /// Adds a minimum-discount filter.
    pub fn min_discount(mut self, min_percent: Option<u32>) -> Self {
        if let Some(min_percent) = min_percent {
            self.chain.add(DiscountFilter::new(min_percent));
        }
        self
    }

    /// Adds a free-text search filter.
    pub fn search(mut self, query: &str) -> Self {
        if !query.trim().is_empty() {
            self.chain.add(SearchFilter::new(query));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Filter matching a case-insensitive substring of title, category, or
/// description.
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    /// Creates a new search filter; the query is trimmed and lowercased once.
    pub fn new(query: &str) -> Self {
        Self { query: query.trim().to_lowercase() }
    }
}

impl Filter for SearchFilter {
    fn matches(&self, benefit: &Benefit) -> bool {
        if self.query.is_empty() {
            return true;
        }

        let haystack = format!("{}\n{}\n{}", benefit.title, benefit.category, benefit.description)
            .to_lowercase();
        haystack.contains(&self.query)
    }

    fn description(&self) -> String {
        format!("Search: \"{}\"", self.query)
    }
}
