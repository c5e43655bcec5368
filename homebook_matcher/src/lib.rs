#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Heuristic slot extraction for booking messages.
//!
//! This crate turns a free-text message into zero or more booking slots
//! (service, date, time, subscriber flag), each with a confidence score.
//!
//! # Key Features
//! - Memoized service catalog loaded from a JSON file
//! - Tiered keyword scoring for service names
//! - Relative, weekday and numeric date parsing
//! - Day-part keywords, 12-hour and 24-hour times
//! - Negation-aware subscriber detection

mod catalog;
mod date;
mod matcher;
mod service;
mod subscriber;
mod text;
mod time;

pub use catalog::{CatalogError, CatalogIndex};
pub use date::extract_date;
pub use matcher::{Intent, MatchResult, match_message};
pub use service::{MIN_SERVICE_CONFIDENCE, ServiceMatch, extract_service};
pub use subscriber::extract_subscriber;
pub use text::normalize;
pub use time::extract_time;

/// A slot value pulled from a message together with the extractor's confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<T> {
    pub value: T,
    pub confidence: f64,
}

impl<T> Extracted<T> {
    pub const fn new(value: T, confidence: f64) -> Self {
        Self { value, confidence }
    }
}
