use serde::Deserialize;
use std::fmt;

/// Default Graph API host
pub const DEFAULT_API_BASE: &str = "https://graph.facebook.com";

/// WhatsApp Business API configuration
#[derive(Clone, Deserialize)]
pub struct WhatsAppBusinessConfig {
    /// Access token (from Meta Business Suite)
    pub access_token: String,
    /// Phone Number ID (the sending phone number)
    pub phone_number_id: String,
    /// Webhook verify token (shared secret for the subscription handshake)
    pub webhook_verify_token: String,
    /// API version (default: v20.0)
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Graph API host, overridable for proxies and tests
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_version() -> String {
    "v20.0".to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl fmt::Debug for WhatsAppBusinessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhatsAppBusinessConfig")
            .field("access_token", &"[REDACTED]")
            .field("phone_number_id", &self.phone_number_id)
            .field("webhook_verify_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl WhatsAppBusinessConfig {
    /// Create with required fields
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        phone_number_id: impl Into<String>,
        webhook_verify_token: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            phone_number_id: phone_number_id.into(),
            webhook_verify_token: webhook_verify_token.into(),
            api_version: default_api_version(),
            api_base: default_api_base(),
        }
    }

    /// Set the Graph API version
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the Graph API host
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Get API URL for messages endpoint
    #[must_use]
    pub fn messages_url(&self) -> String {
        format!(
            "{}/{}/{}/messages",
            self.api_base.trim_end_matches('/'),
            self.api_version,
            self.phone_number_id
        )
    }
}
