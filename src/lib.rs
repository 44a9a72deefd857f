//! perks-cli - Fast benefits catalog search CLI
//!
//! Browses a catalog of benefit (discount/perk) records: a pure query engine
//! filters, sorts, and paginates; a two-phase filter state decouples draft
//! edits from the applied criteria; and a feed accumulates pages for
//! "show more" style listings.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod engine;
pub mod feed;
pub mod filters;
pub mod format;
pub mod state;

pub use catalog::{ApiError, Benefit, CatalogSource, HttpCatalog, SampleCatalog};
pub use config::Config;
pub use engine::{Criteria, QueryResult, SortBy};
pub use feed::Feed;
pub use state::FilterState;
