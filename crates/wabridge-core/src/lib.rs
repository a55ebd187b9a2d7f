//! wabridge Core - message relays
//!
//! - `OutboundRelay`: send a WhatsApp text and record it
//! - `InboundRelay`: webhook handshake, automated reply, GraphQL forward
//! - `RelayConfig`: explicit configuration shared by both relays

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod event;
pub mod graphql;
pub mod inbound;
pub mod outbound;
pub mod reply;

pub use config::{GraphqlConfig, RelayConfig, ReplyConfig};
pub use error::{Error, Result};
pub use event::{HttpEvent, HttpResponse, SendArguments, SendInvocation};
pub use graphql::{GraphqlClient, MessageMutation, ReceiveMessage, RECEIVE_MESSAGE_MUTATION};
pub use inbound::InboundRelay;
pub use outbound::OutboundRelay;
pub use reply::ReplyGenerator;
