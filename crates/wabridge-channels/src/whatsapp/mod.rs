//! WhatsApp Business Cloud API

/// WhatsApp Business Cloud API adapter.
pub mod adapter;
/// WhatsApp Business API configuration and credentials.
pub mod config;
/// WhatsApp Business API request and webhook types.
pub mod types;
/// Webhook verification and delivery parsing.
pub mod webhook;

pub use adapter::WhatsAppBusinessAdapter;
pub use config::WhatsAppBusinessConfig;
pub use types::*;
pub use webhook::{
    parse_delivery, verify_subscription, InboundMessage, MalformedPayload, MessageKind,
    ParsedDelivery,
};
