//! WhatsApp webhook endpoint
//!
//! Converts the HTTP request into an [`HttpEvent`] and returns the inbound
//! relay's status and body verbatim.

use axum::{
    extract::{Extension, Query},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use wabridge_core::{HttpEvent, InboundRelay};

/// Handle WhatsApp webhook verification (GET) and delivery (POST)
async fn whatsapp_webhook(
    Extension(relay): Extension<Arc<InboundRelay>>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Response {
    debug!(method = %method, "Received WhatsApp webhook");

    let event = HttpEvent {
        http_method: method.as_str().to_string(),
        query_string_parameters: (!query.is_empty()).then_some(query),
        body: (!body.is_empty()).then_some(Value::String(body)),
    };

    let response = relay.handle(&event).await;
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, response.body).into_response()
}

/// Create webhook routes
pub fn webhooks_routes() -> Router {
    Router::new().route(
        "/api/v1/webhooks/whatsapp",
        get(whatsapp_webhook).post(whatsapp_webhook),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;
    use wabridge_channels::WhatsAppBusinessConfig;
    use wabridge_core::{GraphqlConfig, RelayConfig, ReplyConfig};
    use wabridge_llm::OpenAiConfig;

    fn app() -> Router {
        let config = RelayConfig {
            whatsapp: WhatsAppBusinessConfig::new("wa-token", "PHONE_ID", "SECRET"),
            openai: OpenAiConfig::new("sk-test-0123456789"),
            reply: ReplyConfig::default(),
            graphql: GraphqlConfig::new("http://127.0.0.1:9/graphql", "da2-key"),
            message_table: "messages".to_string(),
        };
        let relay = Arc::new(InboundRelay::from_config(&config).unwrap());
        webhooks_routes().layer(Extension(relay))
    }

    async fn call(request: Request<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn verify_uri(token: &str, challenge: &str) -> String {
        let query = serde_urlencoded::to_string([
            ("hub.mode", "subscribe"),
            ("hub.verify_token", token),
            ("hub.challenge", challenge),
        ])
        .unwrap();
        format!("/api/v1/webhooks/whatsapp?{query}")
    }

    #[tokio::test]
    async fn test_verification_echoes_challenge() {
        let request = Request::get(verify_uri("SECRET", "12345"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(call(request).await, (StatusCode::OK, "12345".to_string()));
    }

    #[tokio::test]
    async fn test_challenge_is_echoed_decoded() {
        let request = Request::get(verify_uri("SECRET", "a b&c=d"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(call(request).await, (StatusCode::OK, "a b&c=d".to_string()));
    }

    #[tokio::test]
    async fn test_verification_mismatch() {
        let request = Request::get(verify_uri("wrong", "12345"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(
            call(request).await,
            (StatusCode::FORBIDDEN, "Verification failed".to_string())
        );
    }

    #[tokio::test]
    async fn test_bare_get_is_bad_request() {
        let request = Request::get("/api/v1/webhooks/whatsapp")
            .body(Body::empty())
            .unwrap();
        assert_eq!(
            call(request).await,
            (StatusCode::BAD_REQUEST, "Bad Request".to_string())
        );
    }

    #[tokio::test]
    async fn test_non_text_delivery_acknowledged() {
        let payload = json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "WABA_ID",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "contacts": [{"wa_id": "5215512345678"}],
                        "messages": [{"id": "wamid.IMG", "type": "image"}]
                    }
                }]
            }]
        });
        let request = Request::post("/api/v1/webhooks/whatsapp")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        assert_eq!(call(request).await, (StatusCode::OK, "ok".to_string()));
    }

    #[tokio::test]
    async fn test_malformed_delivery_is_server_error() {
        let request = Request::post("/api/v1/webhooks/whatsapp")
            .body(Body::from("{not json"))
            .unwrap();
        assert_eq!(
            call(request).await,
            (StatusCode::INTERNAL_SERVER_ERROR, "error".to_string())
        );
    }
}
