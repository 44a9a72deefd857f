//! Sort comparators for query results.

use crate::catalog::Benefit;
use crate::engine::criteria::SortBy;
use crate::engine::discount;
use std::cmp::Ordering;

/// True when sorting would actually reorder anything.
///
/// Relevance with an empty query compares everything equal, and the engine
/// must skip the sort entirely in that case rather than run a no-op
/// comparator: the input order may itself be meaningful (e.g. a featured
/// ordering from the data source) and is preserved exactly.
pub fn should_sort(sort_by: SortBy, query: &str) -> bool {
    sort_by != SortBy::Relevance || !query.trim().is_empty()
}

/// Compares two benefits under a sort strategy.
///
/// Total order suitable for a stable sort; ties compare equal and keep their
/// prior relative order. `query` only participates in relevance ranking.
pub fn compare(a: &Benefit, b: &Benefit, sort_by: SortBy, query: &str) -> Ordering {
    match sort_by {
        SortBy::TitleAsc => compare_titles(&a.title, &b.title),
        SortBy::ExpiresAsc => a.expires_at.cmp(&b.expires_at),
        SortBy::ExpiresDesc => b.expires_at.cmp(&a.expires_at),
        SortBy::DiscountDesc => {
            // None sorts below any parsed percentage, so unparseable labels
            // land last in descending order
            let a_pct = discount::parse_percent(&a.discount);
            let b_pct = discount::parse_percent(&b.discount);
            b_pct.cmp(&a_pct)
        }
        SortBy::Relevance => compare_relevance(a, b, query),
    }
}

/// Case-folded title comparison with a raw tiebreak to keep the order total.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Relevance ranking: three boolean gates evaluated left to right, each
/// "true beats false". Records equal on all gates compare equal.
fn compare_relevance(a: &Benefit, b: &Benefit, query: &str) -> Ordering {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Ordering::Equal;
    }

    let a_title = a.title.to_lowercase();
    let b_title = b.title.to_lowercase();

    let starts = |title: &str| title.starts_with(&query);
    let gate = starts(&b_title).cmp(&starts(&a_title));
    if gate != Ordering::Equal {
        return gate;
    }

    let gate = b_title.contains(&query).cmp(&a_title.contains(&query));
    if gate != Ordering::Equal {
        return gate;
    }

    let in_category = |benefit: &Benefit| benefit.category.to_lowercase().contains(&query);
    in_category(b).cmp(&in_category(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn make_benefit(title: &str, discount: &str, category: &str, expires_at: DateTime<Utc>) -> Benefit {
        Benefit {
            id: "TEST".to_string(),
            title: title.to_string(),
            discount: discount.to_string(),
            category: category.to_string(),
            description: "Test".to_string(),
            valid_days: vec!["Lun".to_string()],
            expires_at,
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_should_sort() {
        assert!(!should_sort(SortBy::Relevance, ""));
        assert!(!should_sort(SortBy::Relevance, "   "));
        assert!(should_sort(SortBy::Relevance, "café"));
        assert!(should_sort(SortBy::TitleAsc, ""));
        assert!(should_sort(SortBy::ExpiresAsc, ""));
    }

    #[test]
    fn test_title_asc() {
        let a = make_benefit("Adidas: 10% OFF", "10% OFF", "Shopping", day(1));
        let b = make_benefit("Zara: 10% OFF", "10% OFF", "Shopping", day(1));

        assert_eq!(compare(&a, &b, SortBy::TitleAsc, ""), Ordering::Less);
        assert_eq!(compare(&b, &a, SortBy::TitleAsc, ""), Ordering::Greater);
    }

    #[test]
    fn test_title_asc_ignores_case() {
        let a = make_benefit("adidas", "10% OFF", "Shopping", day(1));
        let b = make_benefit("ZARA", "10% OFF", "Shopping", day(1));

        assert_eq!(compare(&a, &b, SortBy::TitleAsc, ""), Ordering::Less);
    }

    #[test]
    fn test_expires_asc_and_desc() {
        let sooner = make_benefit("A", "10% OFF", "Comida", day(1));
        let later = make_benefit("B", "10% OFF", "Comida", day(20));

        assert_eq!(compare(&sooner, &later, SortBy::ExpiresAsc, ""), Ordering::Less);
        assert_eq!(compare(&sooner, &later, SortBy::ExpiresDesc, ""), Ordering::Greater);
    }

    #[test]
    fn test_discount_desc() {
        let high = make_benefit("A", "30% OFF", "Comida", day(1));
        let low = make_benefit("B", "10% OFF", "Comida", day(1));

        assert_eq!(compare(&high, &low, SortBy::DiscountDesc, ""), Ordering::Less);
        assert_eq!(compare(&low, &high, SortBy::DiscountDesc, ""), Ordering::Greater);
    }

    #[test]
    fn test_discount_desc_unparseable_sorts_last() {
        let parsed = make_benefit("A", "10% OFF", "Comida", day(1));
        let flat = make_benefit("B", "$5 OFF", "Comida", day(1));
        let promo = make_benefit("C", "2x1", "Comida", day(1));

        assert_eq!(compare(&parsed, &flat, SortBy::DiscountDesc, ""), Ordering::Less);
        assert_eq!(compare(&flat, &parsed, SortBy::DiscountDesc, ""), Ordering::Greater);
        // Two unparseable labels tie
        assert_eq!(compare(&flat, &promo, SortBy::DiscountDesc, ""), Ordering::Equal);
    }

    #[test]
    fn test_relevance_empty_query_is_always_equal() {
        let a = make_benefit("Starbucks", "10% OFF", "Café", day(1));
        let b = make_benefit("Uber", "20% OFF", "Transporte", day(2));

        assert_eq!(compare(&a, &b, SortBy::Relevance, ""), Ordering::Equal);
        assert_eq!(compare(&b, &a, SortBy::Relevance, "  "), Ordering::Equal);
    }

    #[test]
    fn test_relevance_starts_with_beats_contains() {
        let starts = make_benefit("Starbucks: 10% OFF", "10% OFF", "Café", day(1));
        let contains = make_benefit("Free Stay at Hilton", "10% OFF", "Viajes", day(1));

        assert_eq!(compare(&starts, &contains, SortBy::Relevance, "sta"), Ordering::Less);
        assert_eq!(compare(&contains, &starts, SortBy::Relevance, "sta"), Ordering::Greater);
    }

    #[test]
    fn test_relevance_contains_beats_category_only() {
        let in_title = make_benefit("Gran café gratis", "2x1", "Comida", day(1));
        let in_category = make_benefit("Starbucks: 2x1", "2x1", "Café", day(1));

        assert_eq!(compare(&in_title, &in_category, SortBy::Relevance, "café"), Ordering::Less);
    }

    #[test]
    fn test_relevance_category_beats_no_match() {
        let in_category = make_benefit("Starbucks: 2x1", "2x1", "Café", day(1));
        let no_match = make_benefit("Uber: 20% OFF", "20% OFF", "Transporte", day(1));

        assert_eq!(compare(&in_category, &no_match, SortBy::Relevance, "café"), Ordering::Less);
    }

    #[test]
    fn test_relevance_equal_gates_tie() {
        let a = make_benefit("Starbucks: 10% OFF", "10% OFF", "Café", day(1));
        let b = make_benefit("Starbucks: 2x1", "2x1", "Café", day(2));

        assert_eq!(compare(&a, &b, SortBy::Relevance, "star"), Ordering::Equal);
    }

    #[test]
    fn test_relevance_query_is_case_insensitive() {
        let starts = make_benefit("Starbucks: 10% OFF", "10% OFF", "Café", day(1));
        let other = make_benefit("Uber: 20% OFF", "20% OFF", "Transporte", day(1));

        assert_eq!(compare(&starts, &other, SortBy::Relevance, "STAR"), Ordering::Less);
    }
}
