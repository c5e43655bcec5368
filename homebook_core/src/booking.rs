//! Finalized bookings and the response shape returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Slot;

/// A completed booking. Never mutated once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Booking {
    pub service: String,
    pub date: String,
    pub time: String,
    pub subscriber: bool,
    pub timestamp: DateTime<Utc>,
}

impl Booking {
    #[must_use]
    pub const fn pricing_note(&self) -> &'static str {
        if self.subscriber {
            "Member pricing will apply."
        } else {
            "Standard pricing will apply."
        }
    }
}

/// Fields submitted through the structured fallback form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingFormData {
    pub service: String,
    pub date: String,
    pub time: String,
    pub subscriber: bool,
}

/// Reply for one conversational turn or form submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub expecting: Option<Slot>,
    pub show_form: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber: Option<bool>,
}

impl ChatResponse {
    /// Completion reply echoing every slot of the booking.
    #[must_use]
    pub fn completed(booking: &Booking) -> Self {
        Self {
            reply: format!(
                "Your booking is confirmed: {} on {} at {}. {}",
                booking.service,
                booking.date,
                booking.time,
                booking.pricing_note()
            ),
            expecting: Some(Slot::Complete),
            show_form: false,
            service: Some(booking.service.clone()),
            date: Some(booking.date.clone()),
            time: Some(booking.time.clone()),
            subscriber: Some(booking.subscriber),
        }
    }
}
