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

//! Multi-turn slot filling for the booking assistant.
//!
//! A conversation collects a service, a date, a time and the customer's
//! subscriber status, one message at a time, and writes a booking once all
//! four are known.
//!
//! # Key Features
//! - Fixed prompt order: service, date, time, subscriber
//! - Structured-form fallback after repeated unrecognised services
//! - Pluggable session store with optional idle expiry
//! - Append-only JSON booking file
//! - Request parsing for the HTTP wire format

mod boundary;
mod controller;
mod error;
mod persistence;
mod store;

pub use boundary::{
    BoundaryError, ChatRequest, FormKind, FormRequest, MessageRequest, handle_request,
    validate_form,
};
pub use controller::{DialogueConfig, DialogueController};
pub use error::DialogueError;
pub use persistence::{InMemoryBookingStore, JsonFileBookingStore};
pub use store::InMemorySessionStore;
