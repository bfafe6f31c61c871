use serde::Serialize;
use thiserror::Error;

/// Everything that can go wrong with a single backend request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ServiceError {
    pub fn reason(&self) -> FailureReason {
        match self {
            ServiceError::Transport(_) => FailureReason::Transport,
            ServiceError::Status { status, .. } => match status {
                401 | 403 => FailureReason::Unauthorized,
                other => FailureReason::HttpStatus(*other),
            },
            ServiceError::Decode(_) => FailureReason::MalformedBody,
        }
    }

    /// Message the server put in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ServiceError::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, ServiceError::Status { .. })
    }
}

/// Reason code carried by a failed [`ActionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "status", rename_all = "snake_case")]
pub enum FailureReason {
    Transport,
    Unauthorized,
    HttpStatus(u16),
    MalformedBody,
    Validation,
    MissingSession,
}

/// Outcome of a single-object operation (save, delete, book, signup).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            reason: None,
        }
    }

    pub fn failed(reason: FailureReason, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            reason: Some(reason),
        }
    }

    /// Map a request error to a failure, choosing between the message for a
    /// rejected request and the one for a request that never completed.
    pub fn from_error(error: &ServiceError, rejected: &str, errored: &str) -> Self {
        let message = if error.is_rejection() { rejected } else { errored };
        Self::failed(error.reason(), message)
    }
}
