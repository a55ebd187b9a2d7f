//! Outbound message endpoint

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;
use wabridge_core::{OutboundRelay, SendInvocation};

/// Send a WhatsApp text and return the stored record
async fn send_message(
    Extension(relay): Extension<Arc<OutboundRelay>>,
    Json(invocation): Json<SendInvocation>,
) -> Response {
    match relay.handle(invocation).await {
        Ok(record) => Json(record).into_response(),
        Err(e) => {
            error!(error = %e, "Outbound relay failed");
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({"error": "Failed to send message"}))).into_response()
        }
    }
}

/// Create message routes
pub fn messages_routes() -> Router {
    Router::new().route("/api/v1/messages", post(send_message))
}
