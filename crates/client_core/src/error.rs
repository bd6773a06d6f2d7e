//! Submission failure classification.

use reqwest::StatusCode;
use shared::error::{ErrorBody, ErrorDetail};
use thiserror::Error;

pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred during analysis";

/// Every way a submission can fail, reduced to what the user is shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The request never produced a response (connect failure, timeout).
    #[error("transport failure: {0}")]
    Transport(String),
    /// The service rejected the input with a list of messages.
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    /// The service reported a failure as a plain message.
    #[error("server error: {0}")]
    Server(String),
    /// No usable detail; carries the transport-level description if any.
    #[error("unclassified failure: {}", .0.as_deref().unwrap_or(FALLBACK_ERROR_MESSAGE))]
    Unknown(Option<String>),
}

impl SubmissionError {
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Transport(_) => FALLBACK_ERROR_MESSAGE.to_string(),
            SubmissionError::Validation(messages) => messages.join(", "),
            SubmissionError::Server(message) => message.clone(),
            SubmissionError::Unknown(description) => description
                .clone()
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string()),
        }
    }
}

/// Classifies a non-2xx response from its status and raw body.
pub fn classify_error_response(status: StatusCode, body: &[u8]) -> SubmissionError {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.detail);

    match detail {
        Some(ErrorDetail::Items(items)) if !items.is_empty() => {
            SubmissionError::Validation(items.into_iter().map(|item| item.msg).collect())
        }
        Some(ErrorDetail::Message(message)) if !message.is_empty() => {
            SubmissionError::Server(message)
        }
        _ => SubmissionError::Unknown(Some(format!(
            "Request failed with status code {}",
            status.as_u16()
        ))),
    }
}
