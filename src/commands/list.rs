//! List command: run the query engine over the catalog with the applied
//! filter state.

use crate::catalog::{ApiError, CatalogSource};
use crate::config::{Config, OutputFormat};
use crate::engine::{self, Criteria, SortBy};
use crate::feed::Feed;
use crate::format::Formatter;
use crate::state::FilterState;
use anyhow::{anyhow, Result};
use chrono::Utc;
use tracing::{debug, info};

/// One-shot criteria overrides from command-line flags. These layer on top
/// of the applied filter state for this invocation only and are never
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct ListOverrides {
    pub category: Option<String>,
    pub days: Option<Vec<String>>,
    pub only_active: bool,
    pub min_discount: Option<u32>,
    pub sort_by: Option<SortBy>,
    /// When set, return exactly this page instead of accumulating
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub max_results: Option<usize>,
}

/// Executes a benefits listing.
pub struct ListCommand {
    config: Config,
}

impl ListCommand {
    /// Creates a new list command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the listing and returns formatted output.
    ///
    /// A positional `query` is a live search: it lands in the applied
    /// criteria immediately (mirrored into the draft) and persists with the
    /// session, unlike flag overrides.
    pub async fn execute(
        &self,
        source: &dyn CatalogSource,
        state: &mut FilterState,
        query: Option<&str>,
        overrides: &ListOverrides,
    ) -> Result<String> {
        if let Some(query) = query {
            debug!("Applying live search: {:?}", query);
            state.apply_direct(|c| c.search = query.to_string());
        }

        let criteria = self.build_criteria(state, overrides);
        criteria.validate()?;

        info!("Querying catalog with: {:?}", criteria);

        let catalog = source.catalog().await.map_err(describe_api_error)?;
        let now = Utc::now();
        let formatter = Formatter::new(self.config.format);

        // An explicit --page means the caller wants that exact window, not
        // an accumulated feed
        if overrides.page.is_some() {
            let result = engine::query(&catalog, &criteria, now);
            if result.is_empty() {
                if let Some(hint) = self.empty_hint(&criteria) {
                    return Ok(hint);
                }
            }
            return Ok(formatter.format_page(&result));
        }

        let max_results = overrides.max_results.unwrap_or(self.config.max_results);
        let mut feed = Feed::new(criteria.clone());

        while feed.len() < max_results {
            let Some(request) = feed.request_next() else {
                break;
            };
            let page = engine::query(&catalog, &request.criteria, now);
            feed.complete(&request, page);
        }

        info!("Accumulated {} of {} matching benefits", feed.len(), feed.total());

        if feed.is_empty() {
            if let Some(hint) = self.empty_hint(&criteria) {
                return Ok(hint);
            }
        }

        let shown = feed.items().len().min(max_results);
        Ok(formatter.format_results(&feed.items()[..shown], feed.total()))
    }

    /// Layers flag overrides onto a copy of the applied criteria.
    fn build_criteria(&self, state: &FilterState, overrides: &ListOverrides) -> Criteria {
        let mut criteria = state.applied().clone();
        criteria.limit = self.config.limit;

        if let Some(category) = &overrides.category {
            criteria.category = Some(category.clone());
        }
        if let Some(days) = &overrides.days {
            criteria.days = days.clone();
        }
        if overrides.only_active {
            criteria.only_active = true;
        }
        if let Some(min) = overrides.min_discount {
            criteria.min_discount_percent = Some(min);
        }
        if let Some(sort_by) = overrides.sort_by {
            criteria.sort_by = sort_by;
        }
        if let Some(page) = overrides.page {
            criteria.page = page;
        }
        if let Some(limit) = overrides.limit {
            criteria.limit = limit;
        }

        criteria
    }

    /// Friendly zero-result message for human-readable formats. A narrow
    /// criteria set is indistinguishable from a genuinely empty catalog, so
    /// the reset suggestion is surfaced to the user.
    fn empty_hint(&self, criteria: &Criteria) -> Option<String> {
        if !matches!(self.config.format, OutputFormat::Table | OutputFormat::Markdown) {
            return None;
        }

        if criteria.has_constraints() {
            Some(
                "No benefits matched your filters.\n\
                 Run `perks-cli filter clear` to reset them."
                    .to_string(),
            )
        } else {
            Some("No benefits found.".to_string())
        }
    }
}

/// Maps a transport failure into a user-facing error with an action hint.
fn describe_api_error(err: ApiError) -> anyhow::Error {
    anyhow!("{}\n{}", err, err.hint())
}
