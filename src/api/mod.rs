//! Web API module for wabridge
//!
//! - `/health`: liveness
//! - `/api/v1/messages`: outbound relay
//! - `/api/v1/webhooks/whatsapp`: inbound relay

pub mod health;
pub mod messages;
pub mod webhooks;

use axum::Router;

pub use health::health_routes;
pub use messages::messages_routes;
pub use webhooks::webhooks_routes;

/// Create the API router with all endpoints
pub fn api_router() -> Router {
    Router::new()
        .merge(health_routes())
        .merge(messages_routes())
        .merge(webhooks_routes())
}
