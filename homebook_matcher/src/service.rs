//! Tiered keyword scoring for service names.
//!
//! Scores, best first:
//! 1. whole keyword at word boundaries: `min(1, len/20) * 0.9`
//! 2. whole keyword as a bare substring: `min(1, len/20) * 0.7`
//! 3. one keyword word at word boundaries: `min(1, len/15) * 0.7`
//! 4. one keyword word of 4+ chars starting a message word: `min(1, len/20) * 0.5`
//!
//! The highest score across the catalog wins; on equal scores the first
//! service in catalog order is kept.

use homebook_core::Service;

use crate::text::{contains_word, contains_word_start, length_ratio, normalize};

/// Scores at or below this are treated as no match.
pub const MIN_SERVICE_CONFIDENCE: f64 = 0.15;

/// Function words and booking-generic terms that never identify a service.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "for", "to", "of", "in", "on", "at", "by", "with",
    "from", "my", "me", "i", "i'm", "im", "is", "are", "am", "it", "its", "be", "can", "could",
    "would", "will", "need", "want", "like", "please", "help", "get", "have", "has", "some",
    "this", "that", "do", "does", "book", "booking", "appointment", "service", "services",
    "schedule", "request", "someone", "home", "house",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceMatch {
    /// Catalog name of the matched service.
    pub name: String,
    pub confidence: f64,
}

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

fn is_scorable(term: &str) -> bool {
    term.chars().count() >= 2 && !is_stop_word(term)
}

/// Score of the first tier `keyword` reaches against a normalized message.
fn keyword_score(message: &str, keyword: &str) -> f64 {
    if contains_word(message, keyword) {
        return length_ratio(keyword, 20.0) * 0.9;
    }
    if message.contains(keyword) {
        return length_ratio(keyword, 20.0) * 0.7;
    }

    let words: Vec<&str> = keyword
        .split_whitespace()
        .filter(|w| is_scorable(w))
        .collect();

    let boundary = words
        .iter()
        .filter(|w| contains_word(message, w))
        .map(|w| length_ratio(w, 15.0) * 0.7)
        .fold(0.0, f64::max);
    if boundary > 0.0 {
        return boundary;
    }

    words
        .iter()
        .filter(|w| w.chars().count() >= 4 && contains_word_start(message, w))
        .map(|w| length_ratio(w, 20.0) * 0.5)
        .fold(0.0, f64::max)
}

/// Finds the catalog service best matching `message`, if any scores above
/// [`MIN_SERVICE_CONFIDENCE`].
#[must_use]
pub fn extract_service(message: &str, catalog: &[Service]) -> Option<ServiceMatch> {
    let message = normalize(message);
    let mut best: Option<(&Service, f64)> = None;

    for service in catalog {
        for keyword in &service.keywords {
            let keyword = normalize(keyword);
            if !is_scorable(&keyword) {
                continue;
            }
            let score = keyword_score(&message, &keyword);
            if score > best.map_or(0.0, |(_, s)| s) {
                best = Some((service, score));
            }
        }
    }

    best.filter(|(_, score)| *score > MIN_SERVICE_CONFIDENCE)
        .map(|(service, confidence)| ServiceMatch {
            name: service.name.clone(),
            confidence,
        })
}
