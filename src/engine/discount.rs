//! Percentage extraction from free-text discount labels.

use regex_lite::Regex;
use std::sync::OnceLock;

fn percent_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s?%").unwrap())
}

/// Extracts the first integer immediately preceding a `%` sign, allowing a
/// single whitespace character in between.
///
/// Returns `None` for labels with no percentage ("$5 OFF", "2x1",
/// "Envío gratis"). Callers treat `None` as failing every percentage
/// threshold and as the lowest priority when sorting by discount.
pub fn parse_percent(label: &str) -> Option<u32> {
    let captures = percent_re().captures(label)?;
    captures.get(1)?.as_str().parse().ok()
}
