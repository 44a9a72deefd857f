//! The benefit query engine: filter, sort, paginate.
//!
//! The engine is pure and synchronous. It reads an immutable catalog slice,
//! allocates a fresh result, and cannot fail on criteria that passed
//! [`Criteria::validate`]; it is safe to invoke concurrently without
//! coordination.

pub mod criteria;
pub mod days;
pub mod discount;
pub mod sort;

use crate::catalog::Benefit;
use crate::filters::FilterChainBuilder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use criteria::{Criteria, CriteriaError, SortBy, DEFAULT_LIMIT};

/// One page of query output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// The page of matching records, at most `limit` long
    pub data: Vec<Benefit>,
    /// Count of records matching the criteria across all pages
    pub total: usize,
    /// 1-based page number this slice corresponds to
    pub page: u32,
    /// Page size the slice was cut with
    pub limit: u32,
}

impl QueryResult {
    /// Returns the number of records in this page.
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Returns true if this page holds no records.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Runs one query against the catalog: filter, conditionally sort, then
/// slice out the requested page.
///
/// `now` is captured once by the caller and injected here so every record in
/// this invocation is judged against the same instant. Criteria must have
/// passed [`Criteria::validate`]; a page past the available data yields an
/// empty slice with the correct `total`.
pub fn query(catalog: &[Benefit], criteria: &Criteria, now: DateTime<Utc>) -> QueryResult {
    let chain = FilterChainBuilder::new()
        .category(criteria.category.clone())
        .active_only(criteria.only_active, now)
        .days(criteria.days.clone())
        .min_discount(criteria.min_discount_percent)
        .search(&criteria.search)
        .build();

    if !chain.is_empty() {
        debug!("Active filters: {}", chain.descriptions().join(", "));
    }

    let mut filtered: Vec<Benefit> =
        catalog.iter().filter(|b| chain.matches(b)).cloned().collect();

    // Relevance with no query must leave the source order untouched, so the
    // sort is skipped outright instead of running a comparator that answers
    // Equal for every pair.
    if sort::should_sort(criteria.sort_by, &criteria.search) {
        filtered.sort_by(|a, b| sort::compare(a, b, criteria.sort_by, &criteria.search));
    }

    let total = filtered.len();
    let start = (criteria.page as usize - 1) * criteria.limit as usize;
    let data: Vec<Benefit> = if start >= filtered.len() {
        Vec::new()
    } else {
        filtered.into_iter().skip(start).take(criteria.limit as usize).collect()
    };

    debug!("Query matched {} records, returning page {} ({} rows)", total, criteria.page, data.len());

    QueryResult { data, total, page: criteria.page, limit: criteria.limit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    fn make_benefit(id: usize, title: &str, discount: &str, category: &str) -> Benefit {
        Benefit {
            id: id.to_string(),
            title: title.to_string(),
            discount: discount.to_string(),
            category: category.to_string(),
            description: format!("{} te ofrece {}.", title, discount.to_lowercase()),
            valid_days: vec!["Lun".to_string(), "Mar".to_string()],
            expires_at: now() + Duration::days(30),
        }
    }

    fn numbered_catalog(count: usize) -> Vec<Benefit> {
        (0..count).map(|i| make_benefit(i, &format!("Benefit {:03}", i), "10% OFF", "Comida")).collect()
    }

    #[test]
    fn test_unconstrained_query_returns_everything_paginated() {
        let catalog = numbered_catalog(45);
        let criteria = Criteria::new();

        let result = query(&catalog, &criteria, now());
        assert_eq!(result.total, 45);
        assert_eq!(result.count(), 20);
        assert_eq!(result.page, 1);
        assert_eq!(result.limit, 20);
        assert_eq!(result.data[0].id, "0");
    }

    #[test]
    fn test_page_slicing() {
        let catalog = numbered_catalog(100);
        let mut criteria = Criteria::new();
        criteria.page = 3;
        criteria.limit = 20;

        let result = query(&catalog, &criteria, now());
        // Page 3 with limit 20 covers 0-based indices 40..60
        assert_eq!(result.count(), 20);
        assert_eq!(result.data.first().unwrap().id, "40");
        assert_eq!(result.data.last().unwrap().id, "59");
        assert_eq!(result.total, 100);
    }

    #[test]
    fn test_last_partial_page() {
        let catalog = numbered_catalog(45);
        let mut criteria = Criteria::new();
        criteria.page = 3;

        let result = query(&catalog, &criteria, now());
        assert_eq!(result.count(), 5);
        assert_eq!(result.total, 45);
    }

    #[test]
    fn test_page_beyond_data_is_empty_not_an_error() {
        let catalog = numbered_catalog(10);
        let mut criteria = Criteria::new();
        criteria.page = 9;

        let result = query(&catalog, &criteria, now());
        assert!(result.is_empty());
        assert_eq!(result.total, 10);
        assert_eq!(result.page, 9);
    }

    #[test]
    fn test_total_reflects_filtered_count_not_page() {
        let mut catalog = numbered_catalog(30);
        catalog.extend((30..40).map(|i| make_benefit(i, "Starbucks", "10% OFF", "Café")));

        let mut criteria = Criteria::new();
        criteria.category = Some("Café".to_string());
        criteria.limit = 3;
        criteria.page = 2;

        let result = query(&catalog, &criteria, now());
        assert_eq!(result.total, 10);
        assert_eq!(result.count(), 3);
        assert!(result.data.iter().all(|b| b.category == "Café"));
    }

    #[test]
    fn test_relevance_without_query_preserves_source_order() {
        // Source order is meaningful (e.g. featured first); with the default
        // sort and no query it must come through untouched
        let catalog = vec![
            make_benefit(0, "Zara: 10% OFF", "10% OFF", "Shopping"),
            make_benefit(1, "Adidas: 20% OFF", "20% OFF", "Shopping"),
            make_benefit(2, "Nike: 15% OFF", "15% OFF", "Shopping"),
        ];

        let result = query(&catalog, &Criteria::new(), now());
        let ids: Vec<&str> = result.data.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_relevance_with_query_ranks_starts_with_first() {
        let catalog = vec![
            make_benefit(0, "Free Stay at Hilton", "10% OFF", "Viajes"),
            make_benefit(1, "Starbucks: 10% OFF", "10% OFF", "Café"),
        ];

        let mut criteria = Criteria::new();
        criteria.search = "sta".to_string();

        let result = query(&catalog, &criteria, now());
        assert_eq!(result.data[0].title, "Starbucks: 10% OFF");
        assert_eq!(result.data[1].title, "Free Stay at Hilton");
    }

    #[test]
    fn test_relevance_sort_is_stable_for_ties() {
        let catalog = vec![
            make_benefit(0, "Starbucks: 2x1", "2x1", "Café"),
            make_benefit(1, "Starbucks: 10% OFF", "10% OFF", "Café"),
            make_benefit(2, "Starbucks: 30% OFF", "30% OFF", "Café"),
        ];

        let mut criteria = Criteria::new();
        criteria.search = "starbucks".to_string();

        // All tie on every relevance gate, so source order survives
        let result = query(&catalog, &criteria, now());
        let ids: Vec<&str> = result.data.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_sort_by_discount_desc() {
        let catalog = vec![
            make_benefit(0, "A", "10% OFF", "Comida"),
            make_benefit(1, "B", "2x1", "Comida"),
            make_benefit(2, "C", "30% OFF", "Comida"),
        ];

        let mut criteria = Criteria::new();
        criteria.sort_by = SortBy::DiscountDesc;

        let result = query(&catalog, &criteria, now());
        let ids: Vec<&str> = result.data.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "0", "1"]);
    }

    #[test]
    fn test_sort_by_expires_asc() {
        let mut catalog = numbered_catalog(3);
        catalog[0].expires_at = now() + Duration::days(30);
        catalog[1].expires_at = now() + Duration::days(5);
        catalog[2].expires_at = now() + Duration::days(15);

        let mut criteria = Criteria::new();
        criteria.sort_by = SortBy::ExpiresAsc;

        let result = query(&catalog, &criteria, now());
        let ids: Vec<&str> = result.data.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "0"]);
    }

    #[test]
    fn test_search_filters_before_sorting() {
        let catalog = vec![
            make_benefit(0, "Uber: 20% OFF", "20% OFF", "Transporte"),
            make_benefit(1, "Starbucks: 10% OFF", "10% OFF", "Café"),
        ];

        let mut criteria = Criteria::new();
        criteria.search = "starbucks".to_string();

        let result = query(&catalog, &criteria, now());
        assert_eq!(result.total, 1);
        assert_eq!(result.data[0].id, "1");
    }

    #[test]
    fn test_combined_category_and_active_example() {
        // Three benefits, filter {category: Comida, onlyActive: true}:
        // only Pizza Hut survives
        let mut pizza = make_benefit(0, "Pizza Hut", "20% OFF", "Comida");
        pizza.valid_days = vec!["Lun".to_string(), "Mar".to_string()];

        let mut burger = make_benefit(1, "Burger King", "$5 OFF", "Comida");
        burger.valid_days = vec!["Mié".to_string()];
        burger.expires_at = now() - Duration::days(1);

        let mut spotify = make_benefit(2, "Spotify", "30% OFF", "Entretenimiento");
        spotify.valid_days = vec!["Dom".to_string()];

        let catalog = vec![pizza, burger, spotify];

        let mut criteria = Criteria::new();
        criteria.category = Some("Comida".to_string());
        criteria.only_active = true;

        let result = query(&catalog, &criteria, now());
        assert_eq!(result.total, 1);
        assert_eq!(result.count(), 1);
        assert_eq!(result.data[0].title, "Pizza Hut");
    }

    #[test]
    fn test_day_filter_locale_symmetric_through_engine() {
        let mut english = make_benefit(0, "A", "10% OFF", "Comida");
        english.valid_days = vec!["Mon".to_string()];
        let mut spanish = make_benefit(1, "B", "10% OFF", "Comida");
        spanish.valid_days = vec!["Lun".to_string()];

        let catalog = vec![english, spanish];

        let mut criteria = Criteria::new();
        criteria.days = vec!["Lun".to_string()];
        let result = query(&catalog, &criteria, now());
        assert_eq!(result.total, 2);

        let mut criteria = Criteria::new();
        criteria.days = vec!["Mon".to_string()];
        let result = query(&catalog, &criteria, now());
        assert_eq!(result.total, 2);
    }

    #[test]
    fn test_min_discount_excludes_unparseable_labels() {
        let catalog = vec![
            make_benefit(0, "A", "2x1", "Comida"),
            make_benefit(1, "B", "15% OFF", "Comida"),
        ];

        let mut criteria = Criteria::new();
        criteria.min_discount_percent = Some(10);

        let result = query(&catalog, &criteria, now());
        assert_eq!(result.total, 1);
        assert_eq!(result.data[0].id, "1");
    }

    #[test]
    fn test_empty_catalog() {
        let result = query(&[], &Criteria::new(), now());
        assert!(result.is_empty());
        assert_eq!(result.total, 0);
    }
}
