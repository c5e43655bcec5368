//! Subscriber (membership) flag extraction.

use regex::Regex;
use std::sync::OnceLock;

use crate::Extracted;
use crate::text::{contains_word, normalize};

const EXPLICIT_CONFIDENCE: f64 = 0.9;
const AFFIRMATION_CONFIDENCE: f64 = 0.7;

/// Characters before a membership keyword searched for a negation.
const NEGATION_WINDOW: usize = 20;

const NEGATIVE_PHRASES: &[&str] = &[
    "not a subscriber",
    "not a member",
    "no membership",
    "not subscribed",
];

const YES_WORDS: &[&str] = &["yes", "yeah", "yep", "yup", "sure", "absolutely", "of course"];
const NO_WORDS: &[&str] = &["no", "nope", "nah", "not really"];

static MEMBERSHIP: OnceLock<Regex> = OnceLock::new();
static NEGATION: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn membership_pattern() -> &'static Regex {
    MEMBERSHIP.get_or_init(|| {
        Regex::new(r"\b(subscriber|subscribed|membership|member)")
            .expect("Static regex pattern is guaranteed to be valid")
    })
}

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn negation_pattern() -> &'static Regex {
    NEGATION.get_or_init(|| {
        Regex::new(r"\b(not|don't|do not|no)\b")
            .expect("Static regex pattern is guaranteed to be valid")
    })
}

/// Up to `NEGATION_WINDOW` characters ending at byte offset `end`.
fn preceding_window(message: &str, end: usize) -> &str {
    let before = &message[..end];
    let start = before
        .char_indices()
        .rev()
        .nth(NEGATION_WINDOW - 1)
        .map_or(0, |(i, _)| i);
    &before[start..]
}

/// Extracts whether the customer says they are a subscriber.
///
/// Explicit negative phrases win, then membership keywords (negated by a
/// nearby "not" / "no" / "don't"), then a bare yes / no when no
/// membership keyword appears at all.
#[must_use]
pub fn extract_subscriber(message: &str) -> Option<Extracted<bool>> {
    let message = normalize(message);

    if NEGATIVE_PHRASES.iter().any(|p| message.contains(p)) {
        return Some(Extracted::new(false, EXPLICIT_CONFIDENCE));
    }

    if let Some(keyword) = membership_pattern().find(&message) {
        let negated = negation_pattern().is_match(preceding_window(&message, keyword.start()));
        return Some(Extracted::new(!negated, EXPLICIT_CONFIDENCE));
    }

    if YES_WORDS.iter().any(|w| contains_word(&message, w)) {
        return Some(Extracted::new(true, AFFIRMATION_CONFIDENCE));
    }
    if NO_WORDS.iter().any(|w| contains_word(&message, w)) {
        return Some(Extracted::new(false, AFFIRMATION_CONFIDENCE));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag_of(message: &str) -> Option<bool> {
        extract_subscriber(message).map(|found| found.value)
    }

    #[test]
    fn explicit_negative_phrases() {
        assert_eq!(flag_of("I'm not a member"), Some(false));
        assert_eq!(flag_of("Not subscribed, sorry"), Some(false));
        assert_eq!(flag_of("no membership here"), Some(false));
    }

    #[test]
    fn membership_keyword_is_positive() {
        assert_eq!(flag_of("I'm a member"), Some(true));
        assert_eq!(flag_of("yes, I have a membership"), Some(true));
        assert_eq!(flag_of("subscriber since last year"), Some(true));
    }

    #[test]
    fn negation_close_to_keyword() {
        assert_eq!(flag_of("I don't have a membership"), Some(false));
        assert_eq!(flag_of("I do not think I'm a subscriber"), Some(false));
    }

    #[test]
    fn negation_far_from_keyword_is_ignored() {
        assert_eq!(
            flag_of("no worries about the price, happily a member"),
            Some(true)
        );
    }

    #[test]
    fn bare_affirmations() {
        assert_eq!(flag_of("Yes"), Some(true));
        assert_eq!(flag_of("yep!"), Some(true));
        assert_eq!(flag_of("nope"), Some(false));
        assert_eq!(flag_of("No."), Some(false));
    }

    #[test]
    fn unrelated_text_has_no_flag() {
        assert!(flag_of("hello").is_none());
        assert!(flag_of("tomorrow at 3pm").is_none());
        assert!(flag_of("another thing").is_none());
    }

    #[test]
    fn window_handles_multibyte_text() {
        assert_eq!(flag_of("café crème — déjà vu — not a member"), Some(false));
        assert_eq!(flag_of("ünïcödé ünïcödé ünïcödé member"), Some(true));
    }
}
