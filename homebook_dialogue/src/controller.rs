//! Dialogue controller: one conversation turn at a time.

use homebook_core::{
    Booking, BookingFormData, BookingStore, ChatResponse, Clock, Service, SessionEntry,
    SessionStore, Slot, SystemClock,
};
use homebook_matcher::{CatalogIndex, MatchResult, match_message};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::error::DialogueError;

/// A different service only replaces a filled one above this confidence.
const SERVICE_OVERRIDE_CONFIDENCE: f64 = 0.3;

/// Catalog names suggested in the service prompt.
const SUGGESTED_SERVICES: usize = 4;

/// Tunables for the dialogue policy.
#[derive(Debug, Clone, Copy)]
pub struct DialogueConfig {
    /// Failed service turns after which the structured form is requested.
    pub fallback_threshold: u32,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            fallback_threshold: 2,
        }
    }
}

/// Drives the booking conversation.
///
/// Slots are asked for in a fixed order (service, date, time, subscriber)
/// but any slot mentioned in any message is kept. As soon as all four are
/// known the booking is written and the session is dropped, within the same
/// turn.
pub struct DialogueController<S = Arc<dyn SessionStore>, B = Arc<dyn BookingStore>>
where
    S: Send + Sync,
    B: Send + Sync,
{
    catalog: Arc<CatalogIndex>,
    sessions: S,
    bookings: B,
    clock: Arc<dyn Clock>,
    config: DialogueConfig,
}

impl<S, B> DialogueController<S, B>
where
    S: SessionStore + Send + Sync,
    B: BookingStore + Send + Sync,
{
    pub fn new(catalog: Arc<CatalogIndex>, sessions: S, bookings: B) -> Self {
        Self {
            catalog,
            sessions,
            bookings,
            clock: Arc::new(SystemClock),
            config: DialogueConfig::default(),
        }
    }

    /// Replace the clock relative dates are resolved against.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: DialogueConfig) -> Self {
        self.config = config;
        self
    }

    pub const fn sessions(&self) -> &S {
        &self.sessions
    }

    pub const fn bookings(&self) -> &B {
        &self.bookings
    }

    /// Handle one free-text message for `session_id`.
    pub async fn process_message(
        &self,
        message: &str,
        session_id: &str,
    ) -> Result<ChatResponse, DialogueError> {
        let mut entry = self
            .sessions
            .get(session_id)
            .await
            .map_err(DialogueError::Store)?
            .unwrap_or_else(|| SessionEntry::new(session_id));

        let expecting_service =
            entry.state.service.is_none() || entry.state.expecting == Some(Slot::Service);
        let catalog = self.catalog.load().await;
        let matched = match_message(message, expecting_service, &catalog, self.clock.today());
        debug!(
            "Session {session_id}: intent={} confidence={:.2}",
            matched.intent, matched.confidence
        );

        apply_service(&mut entry, &matched);
        merge_details(&mut entry, matched);

        if let Some(booking) = entry.state.to_booking(self.clock.now()) {
            return self.finalize(session_id, booking).await;
        }

        let response = self.prompt(&mut entry, &catalog);
        self.sessions
            .put(session_id, entry)
            .await
            .map_err(DialogueError::Store)?;
        Ok(response)
    }

    /// Book directly from the structured form, skipping the conversation.
    ///
    /// The fields are taken as already validated. Any conversation state
    /// for `session_id` is discarded.
    pub async fn handle_form_submission(
        &self,
        form: BookingFormData,
        session_id: &str,
    ) -> Result<ChatResponse, DialogueError> {
        info!("Form submission for session {session_id}");
        let booking = Booking {
            service: form.service,
            date: form.date,
            time: form.time,
            subscriber: form.subscriber,
            timestamp: self.clock.now(),
        };
        self.finalize(session_id, booking).await
    }

    /// Whether the caller should present the structured form for this session.
    pub async fn should_show_fallback_form(&self, session_id: &str) -> Result<bool, DialogueError> {
        let entry = self
            .sessions
            .get(session_id)
            .await
            .map_err(DialogueError::Store)?;
        Ok(entry.is_some_and(|e| self.needs_form(&e)))
    }

    fn needs_form(&self, entry: &SessionEntry) -> bool {
        entry.state.service.is_none() && entry.failures >= self.config.fallback_threshold
    }

    /// Persist, forget the session, and confirm.
    ///
    /// A failed write is logged but the booking is still confirmed to the
    /// caller.
    async fn finalize(
        &self,
        session_id: &str,
        booking: Booking,
    ) -> Result<ChatResponse, DialogueError> {
        match self.bookings.append(&booking).await {
            Ok(()) => info!(
                "Session {session_id} booked {} on {} at {}",
                booking.service, booking.date, booking.time
            ),
            Err(e) => error!("Failed to persist booking for session {session_id}: {e}"),
        }

        self.sessions
            .delete(session_id)
            .await
            .map_err(DialogueError::Store)?;
        Ok(ChatResponse::completed(&booking))
    }

    /// Ask for the first missing slot and record it as expected.
    fn prompt(&self, entry: &mut SessionEntry, catalog: &[Service]) -> ChatResponse {
        let slot = entry.state.next_missing();
        let show_form = slot == Slot::Service && self.needs_form(entry);
        let after_failure = entry.failures > 0 && entry.state.expecting == Some(Slot::Service);
        let state = &mut entry.state;

        let reply = match slot {
            Slot::Service if show_form => {
                info!("Session {}: offering booking form", state.session_id);
                "I'm having trouble working out which service you need. \
                 Please pick it from the booking form below."
                    .to_string()
            }
            Slot::Service => service_prompt(after_failure, catalog),
            Slot::Date => format!(
                "Which date works for your {} booking? (e.g. tomorrow, Friday, or 25/12)",
                state.service.as_deref().unwrap_or("your service")
            ),
            Slot::Time => format!(
                "What time would you like on {}? (e.g. 10am, 15:30, or morning)",
                state.date.as_deref().unwrap_or("that day")
            ),
            Slot::Subscriber | Slot::Complete => {
                "Last question: are you a subscriber or member? (yes/no)".to_string()
            }
        };

        state.expecting = Some(slot);
        ChatResponse {
            reply,
            expecting: Some(slot),
            show_form,
            service: state.service.clone(),
            date: state.date.clone(),
            time: state.time.clone(),
            subscriber: state.subscriber,
        }
    }
}

/// Service assignment for one turn, including the failure counter.
fn apply_service(entry: &mut SessionEntry, matched: &MatchResult) {
    let state = &mut entry.state;
    let Some(name) = matched.service.as_ref() else {
        if state.service.is_none() && matches!(state.expecting, None | Some(Slot::Service)) {
            entry.failures += 1;
        }
        return;
    };

    // A filled service only changes while we are asking for it.
    let replace = state.service.as_deref().is_none_or(|current| {
        current != name.as_str()
            && matched.confidence > SERVICE_OVERRIDE_CONFIDENCE
            && state.expecting == Some(Slot::Service)
    });
    if replace {
        debug!("Session {}: service set to {name}", state.session_id);
        state.service = Some(name.clone());
        entry.failures = 0;
    }
}

/// Latest mention of date, time or subscriber status wins.
fn merge_details(entry: &mut SessionEntry, matched: MatchResult) {
    let state = &mut entry.state;
    if matched.date.is_some() {
        state.date = matched.date;
    }
    if matched.time.is_some() {
        state.time = matched.time;
    }
    if matched.subscriber.is_some() {
        state.subscriber = matched.subscriber;
    }
}

fn service_prompt(after_failure: bool, catalog: &[Service]) -> String {
    let mut reply = if after_failure {
        "Sorry, I couldn't tell which service you need. Which service would you like to book?"
            .to_string()
    } else {
        "Hi! Which service would you like to book?".to_string()
    };

    if !catalog.is_empty() {
        let names: Vec<&str> = catalog
            .iter()
            .take(SUGGESTED_SERVICES)
            .map(|s| s.name.as_str())
            .collect();
        reply.push_str(&format!(" For example: {}.", names.join(", ")));
    }
    reply
}
