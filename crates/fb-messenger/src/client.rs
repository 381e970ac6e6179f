//! Messenger Platform client

use std::sync::Arc;

use crate::bot::MessageDispatcher;
use crate::config::MessengerConfig;
use crate::error::Result;
use crate::subscriptions::SubscriptionManager;
use crate::transport::{HttpTransport, Transport};

/// Both Messenger components sharing one transport
#[derive(Clone)]
pub struct MessengerClient {
    subscriptions: SubscriptionManager,
    bot: MessageDispatcher,
}

impl MessengerClient {
    /// Create a client over HTTP using the configured base URL and timeout
    pub fn new(config: &MessengerConfig) -> Result<Self> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            subscriptions: SubscriptionManager::new(transport.clone()),
            bot: MessageDispatcher::new(transport),
        }
    }

    pub fn subscriptions(&self) -> &SubscriptionManager {
        &self.subscriptions
    }

    pub fn bot(&self) -> &MessageDispatcher {
        &self.bot
    }
}
