//! Expiry filter.

use super::Filter;
use crate::catalog::Benefit;
use chrono::{DateTime, Utc};

/// Filters out benefits that have already expired.
///
/// Holds the instant captured at query start so every record in one engine
/// invocation is judged against the same "now".
pub struct ActiveFilter {
    now: DateTime<Utc>,
}

impl ActiveFilter {
    /// Creates a new active filter pinned to `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Filter for ActiveFilter {
    fn matches(&self, benefit: &Benefit) -> bool {
        benefit.is_active(self.now)
    }

    fn description(&self) -> String {
        "Active only".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn make_benefit(expires_at: DateTime<Utc>) -> Benefit {
        Benefit {
            id: "TEST".to_string(),
            title: "Test Benefit".to_string(),
            discount: "10% OFF".to_string(),
            category: "Comida".to_string(),
            description: "Test".to_string(),
            valid_days: vec!["Lun".to_string()],
            expires_at,
        }
    }

    #[test]
    fn test_active_filter() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let filter = ActiveFilter::new(now);

        assert!(filter.matches(&make_benefit(now + Duration::days(3))));
        assert!(!filter.matches(&make_benefit(now - Duration::seconds(1))));
    }

    #[test]
    fn test_expiring_exactly_now_is_active() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let filter = ActiveFilter::new(now);

        assert!(filter.matches(&make_benefit(now)));
    }

    #[test]
    fn test_active_filter_description() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(ActiveFilter::new(now).description(), "Active only");
    }
}
