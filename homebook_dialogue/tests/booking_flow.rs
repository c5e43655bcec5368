//! End-to-end conversation tests.
//!
//! These tests verify that:
//! - A message carrying every slot books in a single turn
//! - Prompts never skip ahead of a missing earlier slot
//! - Repeated unrecognised services switch the reply to the booking form
//! - Form submissions and write failures still confirm the booking

use async_trait::async_trait;
use chrono::NaiveDate;
use homebook_core::{
    Booking, BookingFormData, BookingStore, ChatResponse, FixedClock, Service, SessionEntry,
    SessionStore, Slot,
};
use homebook_dialogue::{
    DialogueConfig, DialogueController, InMemoryBookingStore, InMemorySessionStore,
    JsonFileBookingStore,
};
use homebook_matcher::CatalogIndex;
use std::sync::Arc;

/// A Wednesday.
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 21).expect("valid date")
}

fn catalog() -> Arc<CatalogIndex> {
    Arc::new(CatalogIndex::from_services(vec![
        Service::new("AC Servicing", &["AC servicing", "air conditioner"]),
        Service::new("Plumbing", &["plumbing", "plumber", "leak"]),
        Service::new("Deep Cleaning", &["deep cleaning", "cleaner"]),
    ]))
}

fn controller() -> DialogueController<Arc<InMemorySessionStore>, Arc<InMemoryBookingStore>> {
    DialogueController::new(
        catalog(),
        Arc::new(InMemorySessionStore::new()),
        Arc::new(InMemoryBookingStore::new()),
    )
    .with_clock(Arc::new(FixedClock::on(today())))
}

/// Slot the response should be asking for, given the values it echoes.
fn first_missing(response: &ChatResponse) -> Slot {
    if response.service.is_none() {
        Slot::Service
    } else if response.date.is_none() {
        Slot::Date
    } else if response.time.is_none() {
        Slot::Time
    } else if response.subscriber.is_none() {
        Slot::Subscriber
    } else {
        Slot::Complete
    }
}

#[tokio::test]
async fn full_booking_in_one_message() {
    let controller = controller();
    let response = controller
        .process_message("I need AC servicing tomorrow at 3pm, I'm a member", "s1")
        .await
        .expect("turn");

    assert_eq!(response.expecting, Some(Slot::Complete));
    assert!(!response.show_form);
    assert_eq!(response.service.as_deref(), Some("AC Servicing"));
    assert_eq!(response.date.as_deref(), Some("2026-10-22"));
    assert_eq!(response.time.as_deref(), Some("15:00"));
    assert_eq!(response.subscriber, Some(true));
    assert!(response.reply.contains("Member pricing will apply."));

    let bookings = controller.bookings().list().await.expect("list");
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].service, "AC Servicing");
    assert!(controller.sessions().is_empty().await);
}

#[tokio::test]
async fn greeting_asks_for_service() {
    let controller = controller();
    let response = controller.process_message("hello", "s1").await.expect("turn");

    assert_eq!(response.expecting, Some(Slot::Service));
    assert!(!response.show_form);
    assert!(response.reply.contains("Which service would you like to book?"));
    assert!(response.service.is_none());
}

#[tokio::test]
async fn repeated_misses_offer_the_form() {
    let controller = controller();

    assert!(!controller.should_show_fallback_form("s1").await.expect("check"));
    controller.process_message("hello", "s1").await.expect("turn");
    assert!(!controller.should_show_fallback_form("s1").await.expect("check"));
    controller
        .process_message("something for my flat", "s1")
        .await
        .expect("turn");
    assert!(controller.should_show_fallback_form("s1").await.expect("check"));

    let third = controller
        .process_message("I don't know", "s1")
        .await
        .expect("turn");
    assert!(third.show_form);
    assert_eq!(third.expecting, Some(Slot::Service));

    // A recognised service clears the fallback.
    let recovered = controller
        .process_message("a plumber please", "s1")
        .await
        .expect("turn");
    assert!(!recovered.show_form);
    assert_eq!(recovered.expecting, Some(Slot::Date));
    assert!(!controller.should_show_fallback_form("s1").await.expect("check"));
}

#[tokio::test]
async fn custom_fallback_threshold() {
    let controller = controller().with_config(DialogueConfig {
        fallback_threshold: 1,
    });
    let response = controller.process_message("hello", "s1").await.expect("turn");
    assert!(response.show_form);
}

#[tokio::test]
async fn slots_given_early_are_kept_but_not_asked_out_of_order() {
    let controller = controller();
    let messages = [
        "tomorrow at 10am",
        "yes I'm a subscriber",
        "hmm",
        "the air conditioner is broken",
    ];

    let mut last = None;
    for message in messages {
        let response = controller.process_message(message, "s1").await.expect("turn");
        assert_eq!(
            response.expecting,
            Some(first_missing(&response)),
            "after {message:?}"
        );
        last = Some(response);
    }

    let last = last.expect("responses");
    assert_eq!(last.expecting, Some(Slot::Complete));
    assert_eq!(last.date.as_deref(), Some("2026-10-22"));
    assert_eq!(last.time.as_deref(), Some("10:00"));
}

#[tokio::test]
async fn weekday_resolves_to_next_occurrence() {
    let controller = controller();
    controller
        .process_message("need a cleaner", "s1")
        .await
        .expect("turn");
    let response = controller.process_message("monday", "s1").await.expect("turn");

    assert_eq!(response.date.as_deref(), Some("2026-10-26"));
    assert_eq!(response.expecting, Some(Slot::Time));
}

#[tokio::test]
async fn confirmed_service_survives_incidental_mentions() {
    let controller = controller();
    controller
        .process_message("I need a plumber", "s1")
        .await
        .expect("turn");
    let response = controller
        .process_message("friday, the air conditioner guy can wait", "s1")
        .await
        .expect("turn");

    assert_eq!(response.service.as_deref(), Some("Plumbing"));
    assert_eq!(response.date.as_deref(), Some("2026-10-23"));
}

#[tokio::test]
async fn form_submission_echoes_values_and_clears_session() {
    let controller = controller();
    controller.process_message("hello", "s1").await.expect("turn");

    let form = BookingFormData {
        service: "Deep Cleaning".to_string(),
        date: "2026-11-02".to_string(),
        time: "08:30".to_string(),
        subscriber: false,
    };
    let response = controller
        .handle_form_submission(form, "s1")
        .await
        .expect("submission");

    assert_eq!(response.expecting, Some(Slot::Complete));
    assert!(!response.show_form);
    assert_eq!(response.service.as_deref(), Some("Deep Cleaning"));
    assert_eq!(response.date.as_deref(), Some("2026-11-02"));
    assert_eq!(response.time.as_deref(), Some("08:30"));
    assert_eq!(response.subscriber, Some(false));
    assert!(response.reply.contains("Standard pricing will apply."));

    assert!(controller.sessions().is_empty().await);
    assert_eq!(controller.bookings().list().await.expect("list").len(), 1);
}

#[tokio::test]
async fn sessions_do_not_share_slots() {
    let controller = controller();
    controller
        .process_message("I need a plumber", "a")
        .await
        .expect("turn");
    let other = controller.process_message("tomorrow", "b").await.expect("turn");

    assert!(other.service.is_none());
    assert_eq!(other.expecting, Some(Slot::Service));
}

#[tokio::test]
async fn bookings_written_to_json_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bookings.json");
    let controller = DialogueController::new(
        catalog(),
        InMemorySessionStore::new(),
        JsonFileBookingStore::new(&path),
    )
    .with_clock(Arc::new(FixedClock::on(today())));

    controller
        .process_message("deep cleaning on 5/11 in the morning, not a member", "s1")
        .await
        .expect("turn");

    let stored: Vec<Booking> =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].date, "2026-11-05");
    assert_eq!(stored[0].time, "09:00");
    assert!(!stored[0].subscriber);
}

struct FailingBookings;

#[async_trait]
impl BookingStore for FailingBookings {
    async fn append(&self, _booking: &Booking) -> anyhow::Result<()> {
        anyhow::bail!("disk full")
    }

    async fn list(&self) -> anyhow::Result<Vec<Booking>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn write_failure_still_confirms() {
    let sessions = Arc::new(InMemorySessionStore::new());
    let controller = DialogueController::new(catalog(), sessions.clone(), FailingBookings)
        .with_clock(Arc::new(FixedClock::on(today())));

    let response = controller
        .process_message("plumber tomorrow at noon, yes", "s1")
        .await
        .expect("turn");

    assert_eq!(response.expecting, Some(Slot::Complete));
    assert!(sessions.is_empty().await);
}

struct BrokenSessions;

#[async_trait]
impl SessionStore for BrokenSessions {
    async fn get(&self, _session_id: &str) -> anyhow::Result<Option<SessionEntry>> {
        anyhow::bail!("connection refused")
    }

    async fn put(&self, _session_id: &str, _entry: SessionEntry) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }

    async fn delete(&self, _session_id: &str) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }
}

#[tokio::test]
async fn session_store_failure_surfaces_as_error() {
    let controller = DialogueController::new(catalog(), BrokenSessions, InMemoryBookingStore::new());
    assert!(controller.process_message("hello", "s1").await.is_err());
    assert!(controller.should_show_fallback_form("s1").await.is_err());
}
