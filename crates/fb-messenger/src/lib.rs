//! fb-messenger: Facebook Messenger Platform client
//!
//! Sends messages through the Send API and manages the app's webhook
//! subscription for a Page. Graph API error envelopes are turned into
//! typed [`MessengerError`] variants keyed by the numeric error code.

pub mod bot;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod subscriptions;
pub mod transport;

#[cfg(test)]
mod testing;

pub use bot::{MessageBody, MessageDispatcher, Recipient, SendMessageRequest};
pub use client::MessengerClient;
pub use config::MessengerConfig;
pub use envelope::{Envelope, ErrorKind, GraphApiError, classify, classify_generic};
pub use error::{MessengerError, Result};
pub use subscriptions::SubscriptionManager;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
