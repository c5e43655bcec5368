//! Wire format of the hosting HTTP endpoint.
//!
//! A request body is either a form submission
//! (`{"type": "form", "data": {...}, "sessionId": "..."}`) or a chat
//! message (`{"message": "...", "sessionId": "..."}`).

use chrono::{NaiveDate, NaiveTime};
use homebook_core::{BookingFormData, BookingStore, ChatResponse, SessionStore};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::controller::DialogueController;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FormKind {
    #[serde(rename = "form")]
    Form,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRequest {
    #[serde(rename = "type")]
    pub kind: FormKind,
    pub data: BookingFormData,
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ChatRequest {
    Form(FormRequest),
    Message(MessageRequest),
}

#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal,
}

impl BoundaryError {
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Internal => 500,
        }
    }

    #[must_use]
    pub fn body(&self) -> serde_json::Value {
        json!({ "error": self.to_string() })
    }
}

fn require(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Rejects form data whose date or time is not in canonical form.
pub fn validate_form(data: &BookingFormData) -> Result<(), BoundaryError> {
    if data.service.trim().is_empty() {
        return Err(BoundaryError::BadRequest("Service is required".to_string()));
    }
    if NaiveDate::parse_from_str(&data.date, "%Y-%m-%d").is_err() {
        return Err(BoundaryError::BadRequest(
            "Date must be in YYYY-MM-DD format".to_string(),
        ));
    }
    if NaiveTime::parse_from_str(&data.time, "%H:%M").is_err() {
        return Err(BoundaryError::BadRequest(
            "Time must be in HH:MM format".to_string(),
        ));
    }
    Ok(())
}

/// Parses a raw request body and runs it through the controller.
pub async fn handle_request<S, B>(
    controller: &DialogueController<S, B>,
    body: &str,
) -> Result<ChatResponse, BoundaryError>
where
    S: SessionStore + Send + Sync,
    B: BookingStore + Send + Sync,
{
    let request: ChatRequest = serde_json::from_str(body)
        .map_err(|e| BoundaryError::BadRequest(format!("Invalid request body: {e}")))?;

    let result = match request {
        ChatRequest::Form(form) => {
            if form.session_id.trim().is_empty() {
                return Err(BoundaryError::BadRequest(
                    "Session ID is required".to_string(),
                ));
            }
            validate_form(&form.data)?;
            controller
                .handle_form_submission(form.data, &form.session_id)
                .await
        }
        ChatRequest::Message(request) => {
            let (Some(message), Some(session_id)) =
                (require(request.message), require(request.session_id))
            else {
                return Err(BoundaryError::BadRequest(
                    "Message and session ID are required".to_string(),
                ));
            };
            controller.process_message(&message, &session_id).await
        }
    };

    result.map_err(|e| {
        error!("Chat request failed: {e}");
        BoundaryError::Internal
    })
}
