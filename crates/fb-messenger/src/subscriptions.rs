//! Subscribing and unsubscribing an app to a Page's webhooks

use std::sync::Arc;

use tracing::{info, warn};

use crate::envelope::{Envelope, classify_generic};
use crate::error::{MessengerError, Result};
use crate::transport::{ApiRequest, Method, Transport};

const SUBSCRIBED_APPS_PATH: &str = "/subscribed_apps";

/// Toggles webhook delivery for the Page the access token belongs to
#[derive(Clone)]
pub struct SubscriptionManager {
    transport: Arc<dyn Transport>,
}

impl SubscriptionManager {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Subscribe the app to the Page. Returns `true` on success.
    pub async fn subscribe(&self, access_token: &str) -> Result<bool> {
        self.toggle(Method::Post, access_token).await?;
        info!("App subscribed to page webhooks");
        Ok(true)
    }

    /// Unsubscribe the app from the Page. Returns `true` on success.
    pub async fn unsubscribe(&self, access_token: &str) -> Result<bool> {
        self.toggle(Method::Delete, access_token).await?;
        info!("App unsubscribed from page webhooks");
        Ok(true)
    }

    async fn toggle(&self, method: Method, access_token: &str) -> Result<()> {
        if access_token.is_empty() {
            return Err(MessengerError::AccessTokenNotSet);
        }

        let request = ApiRequest::new(method, SUBSCRIBED_APPS_PATH).access_token(access_token);
        let response = self.transport.call(request).await?;

        let envelope = Envelope::from_value(response.body)?;
        classify_generic(&envelope).inspect_err(|e| {
            warn!("{} {} failed: {}", method.as_str(), SUBSCRIBED_APPS_PATH, e);
        })
    }
}
