//! Weekday-name normalization across the UI locales.
//!
//! Benefit records and day filters may each carry Spanish or English weekday
//! abbreviations depending on which locale produced them. Matching happens on
//! the canonical (English) token so the two vocabularies interoperate.

/// Maps a weekday abbreviation in either vocabulary to its canonical token.
///
/// Unknown input is returned unchanged; the filter stays permissive rather
/// than erroring on a token outside the known vocabulary.
pub fn normalize(day: &str) -> &str {
    match day {
        "Mon" | "Lun" => "Mon",
        "Tue" | "Mar" => "Tue",
        "Wed" | "Mié" => "Wed",
        "Thu" | "Jue" => "Thu",
        "Fri" | "Vie" => "Fri",
        "Sat" | "Sáb" => "Sat",
        "Sun" | "Dom" => "Sun",
        other => other,
    }
}

/// True if any day in `selected` names the same canonical weekday as any day
/// in `available`.
pub fn any_day_matches<S: AsRef<str>, A: AsRef<str>>(selected: &[S], available: &[A]) -> bool {
    selected.iter().any(|sel| {
        let sel = normalize(sel.as_ref());
        available.iter().any(|avail| normalize(avail.as_ref()) == sel)
    })
}
