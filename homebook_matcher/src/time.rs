//! Time-of-day extraction, returned as 24-hour `HH:MM`.

use regex::Regex;
use std::sync::OnceLock;

use crate::Extracted;
use crate::text::{contains_word, normalize};

const DAY_PART_CONFIDENCE: f64 = 0.8;
const CLOCK_TIME_CONFIDENCE: f64 = 0.9;

/// Day-part words and the slot each one books.
const DAY_PARTS: [(&str, &str); 6] = [
    ("morning", "09:00"),
    ("afternoon", "14:00"),
    ("evening", "18:00"),
    ("night", "20:00"),
    ("noon", "12:00"),
    ("midday", "12:00"),
];

static TWELVE_HOUR: OnceLock<Regex> = OnceLock::new();
static TWENTY_FOUR_HOUR: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn twelve_hour_pattern() -> &'static Regex {
    TWELVE_HOUR.get_or_init(|| {
        Regex::new(r"\b(\d{1,2})(?::(\d{2}))?\s*(am|pm)\b")
            .expect("Static regex pattern is guaranteed to be valid")
    })
}

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn twenty_four_hour_pattern() -> &'static Regex {
    TWENTY_FOUR_HOUR.get_or_init(|| {
        Regex::new(r"\b(\d{1,2}):(\d{2})\b")
            .expect("Static regex pattern is guaranteed to be valid")
    })
}

fn format_time(hour: u32, minute: u32) -> String {
    format!("{hour:02}:{minute:02}")
}

fn twelve_hour(message: &str) -> Option<String> {
    twelve_hour_pattern().captures_iter(message).find_map(|c| {
        let hour: u32 = c.get(1)?.as_str().parse().ok()?;
        let minute: u32 = c.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
        if !(1..=12).contains(&hour) || minute > 59 {
            return None;
        }
        let hour = match (c.get(3)?.as_str(), hour) {
            ("am", 12) => 0,
            ("pm", 12) => 12,
            ("pm", h) => h + 12,
            (_, h) => h,
        };
        Some(format_time(hour, minute))
    })
}

fn twenty_four_hour(message: &str) -> Option<String> {
    twenty_four_hour_pattern()
        .captures_iter(message)
        .find_map(|c| {
            let hour: u32 = c.get(1)?.as_str().parse().ok()?;
            let minute: u32 = c.get(2)?.as_str().parse().ok()?;
            (hour <= 23 && minute <= 59).then(|| format_time(hour, minute))
        })
}

/// Extracts a time of day. Day-part words win over clock times.
#[must_use]
pub fn extract_time(message: &str) -> Option<Extracted<String>> {
    let message = normalize(message);

    if let Some((_, time)) = DAY_PARTS
        .iter()
        .find(|(word, _)| contains_word(&message, word))
    {
        return Some(Extracted::new((*time).to_string(), DAY_PART_CONFIDENCE));
    }

    twelve_hour(&message)
        .or_else(|| twenty_four_hour(&message))
        .map(|time| Extracted::new(time, CLOCK_TIME_CONFIDENCE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time_of(message: &str) -> Option<String> {
        extract_time(message).map(|found| found.value)
    }

    #[test]
    fn day_parts_map_to_fixed_slots() {
        assert_eq!(time_of("Friday morning").as_deref(), Some("09:00"));
        assert_eq!(time_of("in the afternoon").as_deref(), Some("14:00"));
        assert_eq!(time_of("evening is best").as_deref(), Some("18:00"));
        assert_eq!(time_of("at night").as_deref(), Some("20:00"));
        assert_eq!(time_of("around noon").as_deref(), Some("12:00"));
        assert_eq!(time_of("midday").as_deref(), Some("12:00"));
    }

    #[test]
    fn day_part_beats_clock_time() {
        assert_eq!(time_of("3pm or in the morning").as_deref(), Some("09:00"));
    }

    #[test]
    fn twelve_hour_clock() {
        assert_eq!(time_of("at 3pm").as_deref(), Some("15:00"));
        assert_eq!(time_of("at 3:30 PM").as_deref(), Some("15:30"));
        assert_eq!(time_of("9 am").as_deref(), Some("09:00"));
        assert_eq!(time_of("12am").as_deref(), Some("00:00"));
        assert_eq!(time_of("12pm").as_deref(), Some("12:00"));
        assert_eq!(time_of("12:45am").as_deref(), Some("00:45"));
    }

    #[test]
    fn twenty_four_hour_clock() {
        assert_eq!(time_of("at 17:45").as_deref(), Some("17:45"));
        assert_eq!(time_of("0:05").as_deref(), Some("00:05"));
    }

    #[test]
    fn out_of_range_times_are_ignored() {
        assert!(time_of("13pm").is_none());
        assert!(time_of("24:00").is_none());
        assert!(time_of("10:75").is_none());
    }

    #[test]
    fn words_containing_day_parts_do_not_match() {
        assert!(time_of("tonight's game").is_none());
        assert!(time_of("I am a member").is_none());
    }
}
