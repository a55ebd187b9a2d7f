//! Outbound relay: send a WhatsApp text, then record it

use crate::config::RelayConfig;
use crate::error::Result;
use crate::event::SendInvocation;
use std::sync::Arc;
use tracing::{info, instrument};
use wabridge_channels::{TextSender, WhatsAppBusinessAdapter};
use wabridge_store::{MessageRecord, MessageStore};

/// Sends outbound messages and records each successful send
pub struct OutboundRelay {
    sender: Arc<dyn TextSender>,
    store: Arc<dyn MessageStore>,
}

impl OutboundRelay {
    /// Create a relay over the given platform sender and store
    #[must_use]
    pub fn new(sender: Arc<dyn TextSender>, store: Arc<dyn MessageStore>) -> Self {
        Self { sender, store }
    }

    /// Create a relay sending through the WhatsApp Business API
    ///
    /// # Errors
    /// Returns an error if the WhatsApp adapter cannot be created.
    pub fn from_config(config: &RelayConfig, store: Arc<dyn MessageStore>) -> Result<Self> {
        let adapter = WhatsAppBusinessAdapter::new(config.whatsapp.clone())?;
        Ok(Self::new(Arc::new(adapter), store))
    }

    /// Handle an outbound invocation
    pub async fn handle(&self, invocation: SendInvocation) -> Result<MessageRecord> {
        let args = invocation.arguments;
        self.send(&args.recipient, &args.content).await
    }

    /// Send `content` to `recipient` and write the record.
    ///
    /// The record is only written once the platform accepted the send.
    #[instrument(skip(self, content), fields(channel = self.sender.name(), store = self.store.name()))]
    pub async fn send(&self, recipient: &str, content: &str) -> Result<MessageRecord> {
        self.sender.send_text(recipient, content).await?;

        let record = MessageRecord::outbound(recipient, content);
        self.store.put(&record).await?;

        info!(id = %record.id, "Outbound message sent and recorded");
        Ok(record)
    }
}
