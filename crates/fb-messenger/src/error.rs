//! Error types for fb-messenger

use std::borrow::Cow;

use thiserror::Error;

use crate::envelope::ErrorKind;

/// fb-messenger error type
///
/// The first four variants are produced from a Graph API error envelope.
/// `Api` is the generic kind; the other three are the classified codes.
#[derive(Error, Debug)]
pub enum MessengerError {
    #[error("Messenger API error: {0}")]
    Api(String),

    #[error("Recipient not found: {0}")]
    RecipientNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Messenger internal error: {0}")]
    InternalError(String),

    /// The response could not be read as the expected envelope shape.
    #[error("Malformed Graph API response: {0}")]
    MalformedResponse(String),

    #[error("Page access token not set")]
    AccessTokenNotSet,

    #[error("Graph API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MessengerError {
    /// Human-readable text carried by the error, without the variant prefix.
    pub fn message(&self) -> Cow<'_, str> {
        match self {
            MessengerError::Api(msg)
            | MessengerError::RecipientNotFound(msg)
            | MessengerError::PermissionDenied(msg)
            | MessengerError::InternalError(msg)
            | MessengerError::MalformedResponse(msg)
            | MessengerError::Config(msg) => Cow::Borrowed(msg),
            MessengerError::AccessTokenNotSet => Cow::Borrowed("Page access token not set"),
            MessengerError::Request(err) => Cow::Owned(err.to_string()),
            MessengerError::Json(err) => Cow::Owned(err.to_string()),
        }
    }

    /// Classified kind for errors that came back in an API error envelope.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            MessengerError::Api(_) => Some(ErrorKind::Other),
            MessengerError::RecipientNotFound(_) => Some(ErrorKind::RecipientNotFound),
            MessengerError::PermissionDenied(_) => Some(ErrorKind::PermissionDenied),
            MessengerError::InternalError(_) => Some(ErrorKind::InternalError),
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, MessengerError>;
