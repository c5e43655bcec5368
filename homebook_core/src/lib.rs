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

//! Shared data model and collaborator seams for the booking assistant.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod booking;
pub mod clock;
pub mod state;

pub use booking::{Booking, BookingFormData, ChatResponse};
pub use clock::{Clock, FixedClock, SystemClock};
pub use state::{ConversationState, SessionEntry};

/// A bookable offering from the service catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Service {
    #[must_use]
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

/// One structured field of a booking, plus the terminal `Complete` marker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Service,
    Date,
    Time,
    Subscriber,
    Complete,
}

impl Slot {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Date => "date",
            Self::Time => "time",
            Self::Subscriber => "subscriber",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyed storage for in-flight conversations.
///
/// The dialogue controller depends only on this seam, so the backing store
/// can be process memory or an external keyed store shared by several
/// processes.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> anyhow::Result<Option<SessionEntry>>;
    async fn put(&self, session_id: &str, entry: SessionEntry) -> anyhow::Result<()>;
    async fn delete(&self, session_id: &str) -> anyhow::Result<()>;
}

/// Durable, append-only sink for completed bookings.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn append(&self, booking: &Booking) -> anyhow::Result<()>;
    async fn list(&self) -> anyhow::Result<Vec<Booking>>;
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn get(&self, session_id: &str) -> anyhow::Result<Option<SessionEntry>> {
        (**self).get(session_id).await
    }

    async fn put(&self, session_id: &str, entry: SessionEntry) -> anyhow::Result<()> {
        (**self).put(session_id, entry).await
    }

    async fn delete(&self, session_id: &str) -> anyhow::Result<()> {
        (**self).delete(session_id).await
    }
}

#[async_trait]
impl<T: BookingStore + ?Sized> BookingStore for Arc<T> {
    async fn append(&self, booking: &Booking) -> anyhow::Result<()> {
        (**self).append(booking).await
    }

    async fn list(&self) -> anyhow::Result<Vec<Booking>> {
        (**self).list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_serializes_lowercase() {
        let json = serde_json::to_string(&Slot::Complete).expect("slot serializes");
        assert_eq!(json, "\"complete\"");
        assert_eq!(Slot::Subscriber.to_string(), "subscriber");
    }

    #[test]
    fn service_keywords_default_to_empty() {
        let service: Service =
            serde_json::from_str(r#"{"name":"Plumbing"}"#).expect("valid service json");
        assert_eq!(service.name, "Plumbing");
        assert!(service.keywords.is_empty());
    }
}
