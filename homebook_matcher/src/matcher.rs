//! Composition of the individual extractors into one result per message.

use chrono::NaiveDate;
use homebook_core::Service;
use serde::{Deserialize, Serialize};

use crate::{extract_date, extract_service, extract_subscriber, extract_time};

/// Category of the primary information a message carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Service,
    Date,
    Time,
    Subscriber,
    #[default]
    Unknown,
}

impl Intent {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Date => "date",
            Self::Time => "time",
            Self::Subscriber => "subscriber",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything extracted from one message.
///
/// `confidence` belongs to the primary `intent`; the other slots ride along
/// when the same message also mentioned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub intent: Intent,
    pub service: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub subscriber: Option<bool>,
    pub confidence: f64,
}

impl MatchResult {
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self.intent, Intent::Unknown)
    }
}

/// Extracts booking slots from `message`.
///
/// The service is only looked for when `expecting_service` is set; a
/// matched service is always the primary intent. Otherwise the primary
/// intent is the first of date, time, subscriber that was found.
#[must_use]
pub fn match_message(
    message: &str,
    expecting_service: bool,
    catalog: &[Service],
    today: NaiveDate,
) -> MatchResult {
    let service = if expecting_service {
        extract_service(message, catalog)
    } else {
        None
    };
    let date = extract_date(message, today);
    let time = extract_time(message);
    let subscriber = extract_subscriber(message);

    let (intent, confidence) = if let Some(found) = &service {
        (Intent::Service, found.confidence)
    } else if let Some(found) = &date {
        (Intent::Date, found.confidence)
    } else if let Some(found) = &time {
        (Intent::Time, found.confidence)
    } else if let Some(found) = &subscriber {
        (Intent::Subscriber, found.confidence)
    } else {
        return MatchResult::default();
    };

    MatchResult {
        intent,
        service: service.map(|found| found.name),
        date: date.map(|found| found.value),
        time: time.map(|found| found.value),
        subscriber: subscriber.map(|found| found.value),
        confidence,
    }
}
