use serde::{Deserialize, Serialize};

/// Text message request for the Cloud API `/messages` endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SendTextRequest<'a> {
    /// Always `"whatsapp"`
    pub messaging_product: &'static str,
    /// Recipient phone number / WhatsApp id
    pub to: &'a str,
    /// Always `"text"`
    #[serde(rename = "type")]
    pub message_type: &'static str,
    /// Text payload
    pub text: TextBody<'a>,
}

/// Body of an outgoing text message
#[derive(Debug, Clone, Serialize)]
pub struct TextBody<'a> {
    /// Message text
    pub body: &'a str,
}

impl<'a> SendTextRequest<'a> {
    /// Build a text message request
    #[must_use]
    pub fn new(to: &'a str, body: &'a str) -> Self {
        Self {
            messaging_product: "whatsapp",
            to,
            message_type: "text",
            text: TextBody { body },
        }
    }
}

/// Incoming webhook event from WhatsApp Business API
///
/// Every field below `entry` is lenient: the relay only reads the first
/// entry, change, contact and message, and decides itself what is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppBusinessWebhook {
    /// Object type (normally "whatsapp_business_account")
    #[serde(default)]
    pub object: Option<String>,
    /// Entry array
    pub entry: Vec<WebhookEntry>,
}

/// Webhook entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEntry {
    /// Business Account ID
    #[serde(default)]
    pub id: Option<String>,
    /// Changes array
    #[serde(default)]
    pub changes: Vec<WebhookChange>,
}

/// Webhook change event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookChange {
    /// Value containing the actual message data
    #[serde(default)]
    pub value: WebhookValue,
    /// Field name
    #[serde(default)]
    pub field: Option<String>,
}

/// Webhook value containing message data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookValue {
    /// Messaging product
    #[serde(default)]
    pub messaging_product: Option<String>,
    /// Contacts (sender info)
    #[serde(default)]
    pub contacts: Vec<WebhookContact>,
    /// Messages
    #[serde(default)]
    pub messages: Vec<WebhookMessage>,
}

/// Webhook contact (sender info)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookContact {
    /// Profile info
    #[serde(default)]
    pub profile: Option<WebhookProfile>,
    /// Sender's WhatsApp id
    #[serde(default)]
    pub wa_id: Option<String>,
}

/// Webhook profile (user profile)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookProfile {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// Webhook message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookMessage {
    /// Sender phone number
    #[serde(default)]
    pub from: Option<String>,
    /// Message ID
    #[serde(default)]
    pub id: String,
    /// Timestamp (unix seconds, as a string)
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Message type
    #[serde(rename = "type", default)]
    pub message_type: String,
    /// Text content (for text messages)
    #[serde(default)]
    pub text: Option<TextContent>,
}

/// Text content in message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    /// Message body
    #[serde(default)]
    pub body: Option<String>,
}
