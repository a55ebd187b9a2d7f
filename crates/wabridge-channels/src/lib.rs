//! wabridge Channels - WhatsApp Business channel adapter
//!
//! This crate covers everything that touches the WhatsApp Business Cloud API:
//! - Outbound text delivery (`TextSender`)
//! - Webhook subscription verification
//! - Typed parsing of inbound webhook deliveries

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod message;
pub mod util;
pub mod whatsapp;

pub use error::{Error, Result};
pub use message::TextSender;
pub use whatsapp::{
    parse_delivery, verify_subscription, InboundMessage, MalformedPayload, MessageKind,
    ParsedDelivery, WhatsAppBusinessAdapter, WhatsAppBusinessConfig, WhatsAppBusinessWebhook,
};
