use super::config::WhatsAppBusinessConfig;
use super::types::SendTextRequest;
use crate::error::{Error, Result};
use crate::message::TextSender;

use std::time::Duration;
use tracing::{debug, info, instrument};

/// WhatsApp Business API adapter
pub struct WhatsAppBusinessAdapter {
    config: WhatsAppBusinessConfig,
    client: reqwest::Client,
}

impl WhatsAppBusinessAdapter {
    /// Create a new WhatsApp Business adapter
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: WhatsAppBusinessConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {e}")))?;

        info!(
            phone_number_id = %config.phone_number_id,
            api_version = %config.api_version,
            "WhatsApp Business API adapter initialized"
        );

        Ok(Self { config, client })
    }
}

#[async_trait::async_trait]
impl TextSender for WhatsAppBusinessAdapter {
    fn name(&self) -> &str {
        "whatsapp"
    }

    #[instrument(skip(self, body), fields(to = %to))]
    async fn send_text(&self, to: &str, body: &str) -> Result<()> {
        let url = self.config.messages_url();

        self.client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&SendTextRequest::new(to, body))
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to send message: {e}")))?
            .error_for_status()
            .map_err(|e| Error::WhatsApp(format!("Send rejected: {e}")))?;

        debug!("WhatsApp message accepted");
        Ok(())
    }
}
