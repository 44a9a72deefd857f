//! Data models for benefits and the backend JSON envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single benefit (discount/perk) record from the catalog.
///
/// Records are produced by the backend and never mutated by this crate;
/// the query engine only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benefit {
    /// Stable unique identifier
    pub id: String,
    /// Display title, e.g. "Starbucks: 10% OFF"
    pub title: String,
    /// Free-text discount label; may or may not contain a percentage
    pub discount: String,
    /// Category drawn from the fixed vocabulary
    pub category: String,
    /// Longer description shown on the detail view
    pub description: String,
    /// Weekdays the benefit is valid on, in either locale vocabulary
    pub valid_days: Vec<String>,
    /// Expiry instant
    pub expires_at: DateTime<Utc>,
}

impl Benefit {
    /// Returns true if the benefit has not expired as of `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at >= now
    }
}

/// Paginated list envelope returned by `GET /api/benefits`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEnvelope {
    pub data: Vec<Benefit>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub success: bool,
}

/// Single-record envelope returned by `GET /api/benefits/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitEnvelope {
    pub data: Benefit,
    pub success: bool,
}

/// Envelope returned by `GET /api/benefits/categories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesEnvelope {
    pub data: Vec<String>,
    pub success: bool,
}

/// Failure envelope: `{ "error": "...", "success": false }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub success: bool,
}
