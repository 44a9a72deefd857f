//! Result accumulation for paginated queries.
//!
//! A [`Feed`] merges successive pages fetched for one applied criteria set
//! into a single ordered list, deduplicated by record id. Changing the
//! criteria discards everything and restarts from page 1; a page that was
//! still in flight across the change is rejected on arrival instead of being
//! merged into the new list.

use crate::catalog::Benefit;
use crate::engine::{Criteria, QueryResult};
use std::collections::HashSet;
use tracing::debug;

/// Ticket for one outstanding page fetch.
///
/// Carries the criteria positioned at the page to fetch, plus the feed
/// generation it was issued under so a stale completion can be recognized.
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Criteria to query with, `page` already set to the page to fetch
    pub criteria: Criteria,
    generation: u64,
}

/// Accumulates pages of one query into a deduplicated, ordered list.
#[derive(Debug, Default)]
pub struct Feed {
    criteria: Criteria,
    items: Vec<Benefit>,
    seen: HashSet<String>,
    total: usize,
    next_page: u32,
    in_flight: bool,
    started: bool,
    generation: u64,
}

impl Feed {
    /// Creates a feed for one criteria set, positioned before page 1.
    ///
    /// The criteria's own `page` field is ignored; the feed controls paging.
    pub fn new(criteria: Criteria) -> Self {
        Self {
            criteria,
            items: Vec::new(),
            seen: HashSet::new(),
            total: 0,
            next_page: 1,
            in_flight: false,
            started: false,
            generation: 0,
        }
    }

    /// The criteria this feed is accumulating for.
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// The accumulated records, in fetch order.
    pub fn items(&self) -> &[Benefit] {
        &self.items
    }

    /// Criteria-wide match count reported by the most recent page.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of accumulated records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True while further pages could add records. Before the first page
    /// completes this is always true.
    pub fn has_more(&self) -> bool {
        !self.started || self.items.len() < self.total
    }

    /// Replaces the criteria: discards all accumulated state and restarts
    /// from page 1. Any page still in flight becomes stale and will be
    /// rejected when it completes.
    pub fn reset(&mut self, criteria: Criteria) {
        debug!("Feed reset, discarding {} accumulated records", self.items.len());
        self.criteria = criteria;
        self.items.clear();
        self.seen.clear();
        self.total = 0;
        self.next_page = 1;
        self.in_flight = false;
        self.started = false;
        self.generation += 1;
    }

    /// Issues a request for the next page, or `None` when a fetch is already
    /// outstanding or no more records remain.
    pub fn request_next(&mut self) -> Option<PageRequest> {
        if self.in_flight || !self.has_more() {
            return None;
        }

        self.in_flight = true;
        Some(PageRequest {
            criteria: self.criteria.at_page(self.next_page),
            generation: self.generation,
        })
    }

    /// Merges a completed page into the feed. Returns false (and merges
    /// nothing) when the request predates the latest criteria change.
    pub fn complete(&mut self, request: &PageRequest, page: QueryResult) -> bool {
        if request.generation != self.generation {
            debug!("Discarding stale page {} from a previous criteria set", page.page);
            return false;
        }

        self.in_flight = false;
        self.started = true;
        self.total = page.total;
        self.next_page = request.criteria.page + 1;

        for benefit in page.data {
            if self.seen.insert(benefit.id.clone()) {
                self.items.push(benefit);
            }
        }

        true
    }

    /// Marks an outstanding request as failed so the page can be re-requested.
    pub fn fail(&mut self, request: &PageRequest) {
        if request.generation == self.generation {
            self.in_flight = false;
        }
    }
}
