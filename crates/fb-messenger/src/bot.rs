//! Messenger Send API

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::envelope::{Envelope, classify};
use crate::error::{MessengerError, Result};
use crate::transport::{ApiRequest, Method, Transport};

const MESSAGES_PATH: &str = "/messages";

/// Sends messages and classifies Send API failures
#[derive(Clone)]
pub struct MessageDispatcher {
    transport: Arc<dyn Transport>,
}

impl MessageDispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send `payload` as-is and return the `message_id` Facebook assigned.
    ///
    /// The payload usually looks like `{recipient: {id}, message: {...}}` but
    /// its shape is not checked here. Errors come back classified by code:
    /// `RecipientNotFound` (100), `PermissionDenied` (10), `InternalError` (2),
    /// `Api` otherwise. A success body without a string `message_id` is a
    /// `MalformedResponse`.
    pub async fn send<P>(&self, access_token: &str, payload: &P) -> Result<String>
    where
        P: Serialize + ?Sized,
    {
        if access_token.is_empty() {
            return Err(MessengerError::AccessTokenNotSet);
        }

        let body = serde_json::to_value(payload)?;
        let request = ApiRequest::new(Method::Post, MESSAGES_PATH)
            .access_token(access_token)
            .json(body);

        let response = self.transport.call(request).await?;
        let envelope = Envelope::from_value(response.body)?;

        if let Err(e) = classify(&envelope) {
            warn!("Send API error: {}", e);
            return Err(e);
        }

        let message_id = envelope.str_field("message_id")?.to_string();
        debug!(
            "Delivered to {}",
            envelope.get("recipient_id").and_then(|v| v.as_str()).unwrap_or("-")
        );
        info!("Message sent successfully: {}", message_id);

        Ok(message_id)
    }

    /// Send a plain text message to a page-scoped user id
    pub async fn send_text(&self, access_token: &str, recipient_id: &str, text: &str) -> Result<String> {
        self.send(access_token, &SendMessageRequest::text(recipient_id, text))
            .await
    }
}

/// The common Send API payload: a recipient and a message body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub recipient: Recipient,
    pub message: MessageBody,
}

impl SendMessageRequest {
    pub fn text(recipient_id: &str, text: &str) -> Self {
        Self {
            recipient: Recipient {
                id: recipient_id.to_string(),
            },
            message: MessageBody {
                text: Some(text.to_string()),
                extra: serde_json::Map::new(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
}

/// Message content. Fields other than `text` (attachments, quick replies)
/// are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
