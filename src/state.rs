//! Two-phase filter state: draft criteria being edited vs. applied criteria
//! actually driving queries.
//!
//! The draft is what a filter editor mutates; nothing reaches the query
//! engine until an explicit `apply`. Instant-search fields bypass the
//! draft/apply step through [`FilterState::apply_direct`]. The whole state
//! persists between CLI invocations as a JSON session file.

use crate::engine::{Criteria, SortBy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Draft and applied criteria for one browsing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    draft: Criteria,
    applied: Criteria,
}

impl FilterState {
    /// Creates a state with both sets fully unconstrained.
    pub fn new() -> Self {
        Self::default()
    }

    /// The criteria currently being edited.
    pub fn draft(&self) -> &Criteria {
        &self.draft
    }

    /// The criteria last submitted to the query engine.
    pub fn applied(&self) -> &Criteria {
        &self.applied
    }

    // Draft edits. None of these touch the applied set.

    /// Sets or clears the draft category.
    pub fn set_draft_category(&mut self, category: Option<String>) {
        self.draft.category = category;
    }

    /// Sets the draft search query.
    pub fn set_draft_search(&mut self, query: impl Into<String>) {
        self.draft.search = query.into();
    }

    /// Replaces the draft day selection.
    pub fn set_draft_days(&mut self, days: Vec<String>) {
        self.draft.days = days;
    }

    /// Adds the day to the draft selection, or removes it if already present.
    pub fn toggle_draft_day(&mut self, day: &str) {
        if let Some(pos) = self.draft.days.iter().position(|d| d == day) {
            self.draft.days.remove(pos);
        } else {
            self.draft.days.push(day.to_string());
        }
    }

    /// Sets the draft active-only flag.
    pub fn set_draft_only_active(&mut self, only_active: bool) {
        self.draft.only_active = only_active;
    }

    /// Sets or clears the draft discount floor.
    pub fn set_draft_min_discount(&mut self, percent: Option<u32>) {
        self.draft.min_discount_percent = percent;
    }

    /// Sets the draft sort strategy.
    pub fn set_draft_sort_by(&mut self, sort_by: SortBy) {
        self.draft.sort_by = sort_by;
    }

    // Transitions between the two sets.

    /// Commits the draft: `applied` becomes a snapshot copy of `draft`.
    /// Later draft edits never reach the already-applied criteria.
    pub fn apply(&mut self) {
        self.applied = self.draft.clone();
    }

    /// Resets both sets to the unconstrained default simultaneously.
    pub fn clear(&mut self) {
        self.draft = Criteria::default();
        self.applied = Criteria::default();
    }

    /// Discards unsaved draft edits: `draft` becomes a copy of `applied`.
    /// Invoked when a filter editor is opened or dismissed without applying.
    pub fn reset_draft_to_applied(&mut self) {
        self.draft = self.applied.clone();
    }

    /// Applies a patch to the applied criteria immediately, without an
    /// explicit apply step, mirroring it into the draft so the editor shows
    /// the same value on next open. Used for live fields like
    /// search-as-you-type.
    pub fn apply_direct(&mut self, patch: impl Fn(&mut Criteria)) {
        patch(&mut self.applied);
        patch(&mut self.draft);
    }

    // Session persistence.

    /// Loads a session file, or returns the default state if it does not
    /// exist yet.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No session file at {}, starting fresh", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {}", path.display()))
    }

    /// Saves the session file, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create session directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write session file: {}", path.display()))?;

        debug!("Saved session to {}", path.display());
        Ok(())
    }
}
