//! Filter command: edit, apply, and clear the persistent filter state.

use crate::engine::{Criteria, SortBy};
use crate::state::FilterState;
use anyhow::{bail, Result};
use tracing::debug;

/// One filter-state operation.
#[derive(Debug, Clone)]
pub enum FilterAction {
    /// Set one draft field from its string form
    Set { field: String, value: String },
    /// Add or remove one day in the draft day selection
    ToggleDay { day: String },
    /// Commit the draft into the applied criteria
    Apply,
    /// Reset both draft and applied criteria
    Clear,
    /// Discard unsaved draft edits
    Reset,
    /// Render both criteria sets
    Show,
}

/// Executes filter-state operations.
pub struct FilterCommand;

impl FilterCommand {
    /// Applies one action to the state and returns a user-facing message.
    pub fn execute(state: &mut FilterState, action: FilterAction) -> Result<String> {
        match action {
            FilterAction::Set { field, value } => {
                Self::set_field(state, &field, &value)?;
                debug!("Draft field {} set to {:?}", field, value);
                Ok(format!(
                    "Draft updated: {} = {}\nRun `perks-cli filter apply` to apply.",
                    field, value
                ))
            }
            FilterAction::ToggleDay { day } => {
                state.toggle_draft_day(&day);
                let selected = state.draft().days.contains(&day);
                Ok(format!(
                    "Day {} {}.\nRun `perks-cli filter apply` to apply.",
                    day,
                    if selected { "selected" } else { "deselected" }
                ))
            }
            FilterAction::Apply => {
                state.apply();
                Ok("Filters applied.".to_string())
            }
            FilterAction::Clear => {
                state.clear();
                Ok("Filters cleared.".to_string())
            }
            FilterAction::Reset => {
                state.reset_draft_to_applied();
                Ok("Draft reset to the applied filters.".to_string())
            }
            FilterAction::Show => Ok(format!(
                "Draft:\n{}\nApplied:\n{}",
                describe(state.draft()),
                describe(state.applied())
            )),
        }
    }

    /// Parses and assigns one draft field. `none` (or an empty value) clears
    /// optional fields.
    fn set_field(state: &mut FilterState, field: &str, value: &str) -> Result<()> {
        let cleared = value.is_empty() || value.eq_ignore_ascii_case("none");

        match field {
            "category" => {
                state.set_draft_category(if cleared { None } else { Some(value.to_string()) });
            }
            "search" => {
                state.set_draft_search(if cleared { String::new() } else { value.to_string() });
            }
            "days" => {
                let days = if cleared {
                    Vec::new()
                } else {
                    value.split(',').map(|d| d.trim().to_string()).filter(|d| !d.is_empty()).collect()
                };
                state.set_draft_days(days);
            }
            "only-active" => {
                let flag = match value.to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => bail!("Invalid boolean '{}'. Use: true, false", value),
                };
                state.set_draft_only_active(flag);
            }
            "min-discount" => {
                let percent = if cleared {
                    None
                } else {
                    match value.parse::<u32>() {
                        Ok(p) => Some(p),
                        Err(_) => bail!("Invalid percentage '{}'. Use a non-negative integer", value),
                    }
                };
                state.set_draft_min_discount(percent);
            }
            "sort" => {
                let sort_by = match value.parse::<SortBy>() {
                    Ok(s) => s,
                    Err(err) => bail!("{}", err),
                };
                state.set_draft_sort_by(sort_by);
            }
            _ => bail!(
                "Unknown filter field '{}'. Use: category, search, days, only-active, min-discount, sort",
                field
            ),
        }

        Ok(())
    }
}

/// Renders one criteria set for `filter show`.
fn describe(criteria: &Criteria) -> String {
    let mut lines = Vec::new();

    lines.push(format!("  category:     {}", criteria.category.as_deref().unwrap_or("(any)")));
    lines.push(format!(
        "  search:       {}",
        if criteria.search_query().is_empty() { "(none)" } else { criteria.search_query() }
    ));
    lines.push(format!(
        "  days:         {}",
        if criteria.days.is_empty() { "(any)".to_string() } else { criteria.days.join(", ") }
    ));
    lines.push(format!("  only-active:  {}", criteria.only_active));
    lines.push(format!(
        "  min-discount: {}",
        criteria.min_discount_percent.map(|p| format!("{}%", p)).unwrap_or_else(|| "(none)".to_string())
    ));
    lines.push(format!("  sort:         {}", criteria.sort_by));

    lines.join("\n")
}
