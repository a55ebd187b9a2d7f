//! Webhook verification and delivery parsing

use super::types::{WebhookMessage, WhatsAppBusinessWebhook};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// A webhook body that does not have the shape of a message delivery
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed payload: {0}")]
pub struct MalformedPayload(pub String);

/// Kind of the first inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    /// Text message with its body
    Text(String),
    /// Any other message type (image, audio, reaction, ...)
    Other(String),
}

/// The first message of a delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// WhatsApp message id (`wamid...`)
    pub id: String,
    /// Message kind
    pub kind: MessageKind,
}

impl InboundMessage {
    /// Text body if this is a text message
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            MessageKind::Text(body) => Some(body),
            MessageKind::Other(_) => None,
        }
    }
}

/// Result of reducing a webhook body to the parts the relay acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDelivery {
    /// Sender's WhatsApp id (first contact of the first change)
    pub sender_id: String,
    /// First message, if the change carried any
    pub message: Option<InboundMessage>,
    /// Entries, changes and messages present in the body but not consulted
    pub ignored: usize,
}

/// Answer a webhook subscription handshake.
///
/// Returns the challenge to echo when `token` matches `expected`; a missing
/// token never matches. A missing challenge echoes as an empty body.
#[must_use]
pub fn verify_subscription(
    expected: &str,
    token: Option<&str>,
    challenge: Option<&str>,
) -> Option<String> {
    let token = token?;
    if constant_time_eq(token, expected) {
        info!("WhatsApp webhook verified");
        Some(challenge.unwrap_or_default().to_string())
    } else {
        None
    }
}

/// Constant-time string comparison.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes().zip(b.bytes()).fold(0, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Parse a decoded webhook body.
///
/// Only the first entry, its first change and that change's first message
/// are consulted. A delivery without a sender contact, or a text message
/// without a body, is malformed.
///
/// # Errors
/// Returns [`MalformedPayload`] when the body does not have the delivery shape.
pub fn parse_delivery(body: &Value) -> Result<ParsedDelivery, MalformedPayload> {
    let webhook: WhatsAppBusinessWebhook = serde_json::from_value(body.clone())
        .map_err(|e| MalformedPayload(e.to_string()))?;

    let entry = webhook
        .entry
        .first()
        .ok_or_else(|| MalformedPayload("no entry".to_string()))?;
    let change = entry
        .changes
        .first()
        .ok_or_else(|| MalformedPayload("no change in first entry".to_string()))?;
    let value = &change.value;

    let sender_id = value
        .contacts
        .first()
        .and_then(|c| c.wa_id.clone())
        .ok_or_else(|| MalformedPayload("no contact wa_id in first change".to_string()))?;

    let message = value.messages.first().map(to_inbound).transpose()?;

    let ignored = (webhook.entry.len() - 1)
        + (entry.changes.len() - 1)
        + value.messages.len().saturating_sub(1);

    Ok(ParsedDelivery {
        sender_id,
        message,
        ignored,
    })
}

fn to_inbound(msg: &WebhookMessage) -> Result<InboundMessage, MalformedPayload> {
    let kind = if msg.message_type == "text" {
        let body = msg
            .text
            .as_ref()
            .and_then(|t| t.body.clone())
            .ok_or_else(|| MalformedPayload("text message without body".to_string()))?;
        MessageKind::Text(body)
    } else {
        MessageKind::Other(msg.message_type.clone())
    };

    Ok(InboundMessage {
        id: msg.id.clone(),
        kind,
    })
}
