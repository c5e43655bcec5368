use regex::Regex;

/// Lowercases, trims, and collapses runs of whitespace to single spaces.
#[must_use]
pub fn normalize(message: &str) -> String {
    message
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// True when `needle` occurs in `haystack` delimited by word boundaries.
pub(crate) fn contains_word(haystack: &str, needle: &str) -> bool {
    Regex::new(&format!(r"\b{}\b", regex::escape(needle))).is_ok_and(|re| re.is_match(haystack))
}

/// True when `needle` occurs in `haystack` starting at a word boundary.
///
/// Found by scanning every occurrence, so `plumb` is found in `plumbing`
/// but not in `replumb`.
pub(crate) fn contains_word_start(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

/// Character length as a ratio of `divisor`, capped at 1.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn length_ratio(text: &str, divisor: f64) -> f64 {
    (text.chars().count() as f64 / divisor).min(1.0)
}
