//! Per-session dialogue state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Booking, Slot};

/// Slots collected so far for one session.
///
/// Slot values are kept in their canonical text form: dates as
/// `YYYY-MM-DD`, times as 24-hour `HH:MM`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationState {
    pub session_id: String,
    pub service: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub subscriber: Option<bool>,
    /// Slot the controller last prompted for; `None` before the first reply.
    pub expecting: Option<Slot>,
}

impl ConversationState {
    #[must_use]
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Self::default()
        }
    }

    /// First unfilled slot in prompt order, or `Slot::Complete`.
    #[must_use]
    pub const fn next_missing(&self) -> Slot {
        if self.service.is_none() {
            Slot::Service
        } else if self.date.is_none() {
            Slot::Date
        } else if self.time.is_none() {
            Slot::Time
        } else if self.subscriber.is_none() {
            Slot::Subscriber
        } else {
            Slot::Complete
        }
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self.next_missing(), Slot::Complete)
    }

    /// Builds the finalized booking, if every slot is filled.
    #[must_use]
    pub fn to_booking(&self, timestamp: DateTime<Utc>) -> Option<Booking> {
        Some(Booking {
            service: self.service.clone()?,
            date: self.date.clone()?,
            time: self.time.clone()?,
            subscriber: self.subscriber?,
            timestamp,
        })
    }
}

/// What a session store holds for one session id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionEntry {
    pub state: ConversationState,
    /// Consecutive turns in which a service was expected but not resolved.
    pub failures: u32,
}

impl SessionEntry {
    #[must_use]
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            state: ConversationState::new(session_id),
            failures: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_missing_follows_prompt_order() {
        let mut state = ConversationState::new("s1");
        assert_eq!(state.next_missing(), Slot::Service);

        state.date = Some("2026-10-20".to_string());
        state.subscriber = Some(true);
        assert_eq!(state.next_missing(), Slot::Service);

        state.service = Some("Plumbing".to_string());
        assert_eq!(state.next_missing(), Slot::Time);

        state.time = Some("09:00".to_string());
        assert!(state.is_complete());
    }

    #[test]
    fn booking_requires_every_slot() {
        let mut state = ConversationState::new("s1");
        state.service = Some("Plumbing".to_string());
        state.date = Some("2026-10-20".to_string());
        state.time = Some("09:00".to_string());
        assert!(state.to_booking(Utc::now()).is_none());

        state.subscriber = Some(false);
        let booking = state.to_booking(Utc::now());
        assert!(booking.is_some_and(|b| !b.subscriber && b.service == "Plumbing"));
    }
}
