//! Query criteria: the full set of filter/sort/pagination parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default page size.
pub const DEFAULT_LIMIT: u32 = 20;

/// Sort strategy for a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Search-query-driven ranking; leaves order untouched without a query.
    #[default]
    Relevance,
    /// Soonest expiry first.
    ExpiresAsc,
    /// Latest expiry first.
    ExpiresDesc,
    /// Highest parsed discount percentage first; unparseable labels last.
    DiscountDesc,
    /// Title, ascending.
    TitleAsc,
}

impl SortBy {
    /// Returns all sort strategies.
    pub fn all() -> &'static [SortBy] {
        &[
            SortBy::Relevance,
            SortBy::ExpiresAsc,
            SortBy::ExpiresDesc,
            SortBy::DiscountDesc,
            SortBy::TitleAsc,
        ]
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relevance" => Ok(SortBy::Relevance),
            "expiresasc" | "expires-asc" => Ok(SortBy::ExpiresAsc),
            "expiresdesc" | "expires-desc" => Ok(SortBy::ExpiresDesc),
            "discountdesc" | "discount-desc" => Ok(SortBy::DiscountDesc),
            "titleasc" | "title-asc" => Ok(SortBy::TitleAsc),
            _ => Err(format!(
                "Unknown sort '{}'. Use: relevance, expiresAsc, expiresDesc, discountDesc, titleAsc",
                s
            )),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortBy::Relevance => "relevance",
            SortBy::ExpiresAsc => "expiresAsc",
            SortBy::ExpiresDesc => "expiresDesc",
            SortBy::DiscountDesc => "discountDesc",
            SortBy::TitleAsc => "titleAsc",
        };
        write!(f, "{}", name)
    }
}

/// Criteria for one catalog query.
///
/// Every field independently defaults to "no constraint"; `page`/`limit`
/// carry the pagination window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Criteria {
    /// Exact-match category, if set
    pub category: Option<String>,
    /// Free-text search over title, category, and description
    pub search: String,
    /// Weekday tokens in either locale; matches if any day overlaps
    pub days: Vec<String>,
    /// Exclude benefits already expired as of query time
    pub only_active: bool,
    /// Minimum parsed discount percentage
    pub min_discount_percent: Option<u32>,
    /// Sort strategy
    pub sort_by: SortBy,
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            category: None,
            search: String::new(),
            days: Vec::new(),
            only_active: false,
            min_discount_percent: None,
            sort_by: SortBy::Relevance,
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Criteria {
    /// Creates unconstrained criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// The trimmed search query, empty when no search is in effect.
    pub fn search_query(&self) -> &str {
        self.search.trim()
    }

    /// True if any filter or sort field deviates from the unconstrained
    /// default. Pagination does not count as a constraint.
    pub fn has_constraints(&self) -> bool {
        self.category.is_some()
            || !self.days.is_empty()
            || self.only_active
            || self.min_discount_percent.is_some()
            || self.sort_by != SortBy::Relevance
            || !self.search_query().is_empty()
    }

    /// Validates the pagination bounds. Must be called before handing the
    /// criteria to the engine; the engine assumes well-formed input.
    pub fn validate(&self) -> Result<(), CriteriaError> {
        if self.page < 1 {
            return Err(CriteriaError::PageOutOfRange(self.page));
        }
        if self.limit < 1 {
            return Err(CriteriaError::LimitOutOfRange(self.limit));
        }
        Ok(())
    }

    /// Returns a copy positioned at `page`.
    pub fn at_page(&self, page: u32) -> Self {
        Self { page, ..self.clone() }
    }
}

/// Malformed criteria rejected before the engine is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("page must be at least 1 (got {0})")]
    PageOutOfRange(u32),
    #[error("limit must be greater than zero (got {0})")]
    LimitOutOfRange(u32),
}
