//! Date extraction.
//!
//! Tried in order: "today" / "tomorrow" (with common misspellings),
//! weekday names, then numeric `D/M/YYYY`, `D/M`, `D-M-YYYY`, `D-M`,
//! `YYYY-M-D`. Dates are returned as `YYYY-MM-DD`.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;
use std::sync::OnceLock;

use crate::Extracted;
use crate::text::normalize;

const NAMED_DATE_CONFIDENCE: f64 = 0.9;
const NUMERIC_DATE_CONFIDENCE: f64 = 0.85;

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

#[derive(Debug, Clone, Copy)]
enum Order {
    DayMonthYear,
    DayMonth,
    YearMonthDay,
}

struct NumericPattern {
    regex: Regex,
    order: Order,
}

static RELATIVE: OnceLock<Regex> = OnceLock::new();
static WEEKDAY: OnceLock<Regex> = OnceLock::new();
static NUMERIC: OnceLock<Vec<NumericPattern>> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Static regex pattern is guaranteed to be valid")
}

fn relative_pattern() -> &'static Regex {
    RELATIVE.get_or_init(|| static_regex(r"\b(today|tomorrow|tommorow|tommorrow)\b"))
}

fn weekday_pattern() -> &'static Regex {
    WEEKDAY.get_or_init(|| {
        static_regex(r"\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
    })
}

/// Numeric patterns in trial order. The guards keep a shorter pattern from
/// matching inside a longer date (`03-04` inside `2026-03-04`).
fn numeric_patterns() -> &'static [NumericPattern] {
    NUMERIC.get_or_init(|| {
        vec![
            NumericPattern {
                regex: static_regex(r"(?:^|[^\d/])(\d{1,2})/(\d{1,2})/(\d{4})(?:$|[^\d/])"),
                order: Order::DayMonthYear,
            },
            NumericPattern {
                regex: static_regex(r"(?:^|[^\d/])(\d{1,2})/(\d{1,2})(?:$|[^\d/])"),
                order: Order::DayMonth,
            },
            NumericPattern {
                regex: static_regex(r"(?:^|[^\d-])(\d{1,2})-(\d{1,2})-(\d{4})(?:$|[^\d-])"),
                order: Order::DayMonthYear,
            },
            NumericPattern {
                regex: static_regex(r"(?:^|[^\d-])(\d{1,2})-(\d{1,2})(?:$|[^\d-])"),
                order: Order::DayMonth,
            },
            NumericPattern {
                regex: static_regex(r"(?:^|[^\d-])(\d{4})-(\d{1,2})-(\d{1,2})(?:$|[^\d-])"),
                order: Order::YearMonthDay,
            },
        ]
    })
}

/// Next `target` strictly after `today`; naming today's weekday means a week out.
fn next_weekday(today: NaiveDate, target: Weekday) -> NaiveDate {
    let ahead = (i64::from(target.num_days_from_monday())
        - i64::from(today.weekday().num_days_from_monday()))
    .rem_euclid(7);
    let ahead = if ahead == 0 { 7 } else { ahead };
    today + Duration::days(ahead)
}

fn parse_numeric(captures: &regex::Captures<'_>, order: Order, today: NaiveDate) -> Option<NaiveDate> {
    let field = |i: usize| captures.get(i)?.as_str().parse::<u32>().ok();

    // `from_ymd_opt` refuses overflowing days and months instead of rolling them.
    match order {
        Order::DayMonthYear => {
            let year = i32::try_from(field(3)?).ok()?;
            NaiveDate::from_ymd_opt(year, field(2)?, field(1)?)
        }
        Order::YearMonthDay => {
            let year = i32::try_from(field(1)?).ok()?;
            NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)
        }
        Order::DayMonth => {
            let (day, month) = (field(1)?, field(2)?);
            let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
            if date < today {
                NaiveDate::from_ymd_opt(today.year() + 1, month, day)
            } else {
                Some(date)
            }
        }
    }
}

fn resolve(message: &str, today: NaiveDate) -> Option<(NaiveDate, f64)> {
    if let Some(found) = relative_pattern().captures(message).and_then(|c| c.get(1)) {
        let date = if found.as_str() == "today" {
            today
        } else {
            today + Duration::days(1)
        };
        return Some((date, NAMED_DATE_CONFIDENCE));
    }

    if let Some(found) = weekday_pattern().captures(message).and_then(|c| c.get(1)) {
        let weekday = WEEKDAYS
            .iter()
            .find(|(name, _)| *name == found.as_str())
            .map(|(_, day)| *day)?;
        return Some((next_weekday(today, weekday), NAMED_DATE_CONFIDENCE));
    }

    numeric_patterns().iter().find_map(|pattern| {
        pattern
            .regex
            .captures_iter(message)
            .find_map(|captures| parse_numeric(&captures, pattern.order, today))
            .map(|date| (date, NUMERIC_DATE_CONFIDENCE))
    })
}

/// Extracts a booking date, resolving relative phrases against `today`.
#[must_use]
pub fn extract_date(message: &str, today: NaiveDate) -> Option<Extracted<String>> {
    let message = normalize(message);
    resolve(&message, today)
        .map(|(date, confidence)| Extracted::new(date.format("%Y-%m-%d").to_string(), confidence))
}
