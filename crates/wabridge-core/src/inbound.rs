//! Inbound relay: WhatsApp webhook -> automated reply -> GraphQL
//!
//! Two branches, no shared state:
//! - `GET` with `hub.mode=subscribe`: subscription handshake
//! - `POST` with a body: message delivery
//!
//! Anything else is a bad request.

use crate::config::RelayConfig;
use crate::error::Result;
use crate::event::{HttpEvent, HttpResponse};
use crate::graphql::{GraphqlClient, MessageMutation, ReceiveMessage};
use crate::reply::ReplyGenerator;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use wabridge_channels::util::mask_for_logging;
use wabridge_channels::{parse_delivery, verify_subscription};
use wabridge_llm::OpenAiProvider;

/// Handles WhatsApp webhook invocations
pub struct InboundRelay {
    verify_token: String,
    reply: ReplyGenerator,
    mutation: Arc<dyn MessageMutation>,
}

impl InboundRelay {
    /// Create a relay from its collaborators
    #[must_use]
    pub fn new(
        verify_token: impl Into<String>,
        reply: ReplyGenerator,
        mutation: Arc<dyn MessageMutation>,
    ) -> Self {
        Self {
            verify_token: verify_token.into(),
            reply,
            mutation,
        }
    }

    /// Create a relay using OpenAI for replies and the configured GraphQL endpoint
    ///
    /// # Errors
    /// Returns an error if a client cannot be created.
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let provider = OpenAiProvider::new(config.openai.clone())?;
        let reply = ReplyGenerator::new(Arc::new(provider), config.reply.clone());
        let mutation = GraphqlClient::new(config.graphql.clone())?;

        Ok(Self::new(
            config.whatsapp.webhook_verify_token.clone(),
            reply,
            Arc::new(mutation),
        ))
    }

    /// Handle one webhook invocation
    #[instrument(skip(self, event), fields(method = %event.http_method))]
    pub async fn handle(&self, event: &HttpEvent) -> HttpResponse {
        if event.http_method == "GET" && event.query("hub.mode") == Some("subscribe") {
            return self.verify(event);
        }

        if event.http_method == "POST" && event.has_body() {
            let outcome = match event.decoded_body() {
                Ok(Some(body)) => self.deliver(&body).await,
                Ok(None) => {
                    debug!("Webhook body decoded to null");
                    return HttpResponse::bad_request();
                }
                Err(e) => Err(e.into()),
            };

            return match outcome {
                Ok(()) => HttpResponse::acknowledged(),
                Err(e) => {
                    error!(error = %e, "Failed to process WhatsApp webhook");
                    HttpResponse::error()
                }
            };
        }

        debug!("Webhook request matched no branch");
        HttpResponse::bad_request()
    }

    fn verify(&self, event: &HttpEvent) -> HttpResponse {
        match verify_subscription(
            &self.verify_token,
            event.query("hub.verify_token"),
            event.query("hub.challenge"),
        ) {
            Some(challenge) => HttpResponse::ok(challenge),
            None => {
                warn!("WhatsApp webhook verification failed");
                HttpResponse::verification_failed()
            }
        }
    }

    async fn deliver(&self, body: &Value) -> Result<()> {
        let delivery = parse_delivery(body)?;

        if delivery.ignored > 0 {
            warn!(
                ignored = delivery.ignored,
                "Webhook carried more than one entry, change or message; only the first is relayed"
            );
        }

        let Some(message) = delivery.message else {
            debug!("Delivery without messages");
            return Ok(());
        };

        let Some(text) = message.text() else {
            debug!(kind = ?message.kind, "Ignoring non-text message");
            return Ok(());
        };

        info!(
            from = %delivery.sender_id,
            text = %mask_for_logging(text),
            "Received WhatsApp message"
        );

        let reply = self.reply.generate(text).await;

        self.mutation
            .receive_message(&ReceiveMessage {
                sender: delivery.sender_id,
                content: reply,
                message_id: message.id,
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReplyConfig;
    use crate::error::Error;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use wabridge_llm::{CompletionRequest, CompletionResponse, LlmProvider};

    struct FakeProvider {
        reply: Option<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl LlmProvider for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        fn default_model(&self) -> &str {
            "fake-model"
        }

        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> wabridge_llm::Result<CompletionResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Some(reply) => Ok(CompletionResponse {
                    content: reply.to_string(),
                    usage: None,
                    finish_reason: None,
                    model: "fake-model".to_string(),
                }),
                None => Err(wabridge_llm::Error::Api("server error".to_string())),
            }
        }
    }

    #[derive(Default)]
    struct FakeMutation {
        fail: bool,
        calls: Mutex<Vec<ReceiveMessage>>,
    }

    #[async_trait::async_trait]
    impl MessageMutation for FakeMutation {
        async fn receive_message(&self, variables: &ReceiveMessage) -> Result<()> {
            self.calls
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(variables.clone());
            if self.fail {
                return Err(Error::Graphql("Unauthorized".to_string()));
            }
            Ok(())
        }
    }

    struct Harness {
        relay: InboundRelay,
        provider: Arc<FakeProvider>,
        mutation: Arc<FakeMutation>,
    }

    fn harness(reply: Option<&'static str>, mutation_fails: bool) -> Harness {
        let provider = Arc::new(FakeProvider {
            reply,
            calls: AtomicUsize::new(0),
        });
        let mutation = Arc::new(FakeMutation {
            fail: mutation_fails,
            ..Default::default()
        });
        let relay = InboundRelay::new(
            "SECRET",
            ReplyGenerator::new(provider.clone(), ReplyConfig::default()),
            mutation.clone(),
        );
        Harness {
            relay,
            provider,
            mutation,
        }
    }

    fn delivery(message: Value) -> Value {
        json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "WABA_ID",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "contacts": [{"profile": {"name": "Ana"}, "wa_id": "5215512345678"}],
                        "messages": [message]
                    }
                }]
            }]
        })
    }

    fn text_delivery() -> Value {
        delivery(json!({
            "from": "5215512345678",
            "id": "wamid.ABC",
            "timestamp": "1718000000",
            "type": "text",
            "text": {"body": "hola"}
        }))
    }

    fn verify_event(token: &str, challenge: &str) -> HttpEvent {
        HttpEvent::new("GET")
            .with_query("hub.mode", "subscribe")
            .with_query("hub.verify_token", token)
            .with_query("hub.challenge", challenge)
    }

    #[tokio::test]
    async fn test_verification_echoes_challenge() {
        let h = harness(Some("hi"), false);

        let response = h.relay.handle(&verify_event("SECRET", "12345")).await;
        assert_eq!(response, HttpResponse::ok("12345"));
    }

    #[tokio::test]
    async fn test_verification_mismatch_is_forbidden() {
        let h = harness(Some("hi"), false);

        for challenge in ["12345", "", "SECRET"] {
            let response = h.relay.handle(&verify_event("wrong", challenge)).await;
            assert_eq!(response.status_code, 403);
            assert_eq!(response.body, "Verification failed");
        }
    }

    #[tokio::test]
    async fn test_get_without_subscribe_is_bad_request() {
        let h = harness(Some("hi"), false);

        let event = HttpEvent::new("GET").with_query("hub.mode", "unsubscribe");
        assert_eq!(h.relay.handle(&event).await, HttpResponse::bad_request());
        assert_eq!(
            h.relay.handle(&HttpEvent::new("PUT")).await,
            HttpResponse::bad_request()
        );
        assert_eq!(
            h.relay.handle(&HttpEvent::new("POST")).await,
            HttpResponse::bad_request()
        );
    }

    #[tokio::test]
    async fn test_text_delivery_forwards_generated_reply() {
        let h = harness(Some("¡Hola! ¿Cómo estás?"), false);

        let event = HttpEvent::new("POST").with_body(text_delivery());
        assert_eq!(h.relay.handle(&event).await, HttpResponse::acknowledged());

        let calls = h.mutation.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[ReceiveMessage {
                sender: "5215512345678".to_string(),
                content: "¡Hola! ¿Cómo estás?".to_string(),
                message_id: "wamid.ABC".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_unread_entries_and_nameless_profile_still_relay() {
        let h = harness(Some("hi"), false);

        let mut body = text_delivery();
        body["entry"].as_array_mut().unwrap().push(json!({"id": "OTHER"}));
        body["entry"][0]["changes"][0]["value"]["contacts"][0]["profile"] = json!({});

        let event = HttpEvent::new("POST").with_body(body);
        assert_eq!(h.relay.handle(&event).await, HttpResponse::acknowledged());
        assert_eq!(h.mutation.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_string_body_is_decoded() {
        let h = harness(Some("ok"), false);

        let event = HttpEvent::new("POST").with_body(Value::String(text_delivery().to_string()));
        assert_eq!(h.relay.handle(&event).await.status_code, 200);
        assert_eq!(h.mutation.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_non_text_delivery_has_no_side_effects() {
        let h = harness(Some("hi"), false);

        let event = HttpEvent::new("POST").with_body(delivery(json!({
            "id": "wamid.IMG",
            "type": "image",
            "image": {"id": "media-1"}
        })));

        assert_eq!(h.relay.handle(&event).await, HttpResponse::acknowledged());
        assert_eq!(h.provider.calls.load(Ordering::SeqCst), 0);
        assert!(h.mutation.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_completion_failure_forwards_apology() {
        let h = harness(None, false);

        let event = HttpEvent::new("POST").with_body(text_delivery());
        assert_eq!(h.relay.handle(&event).await, HttpResponse::acknowledged());

        let calls = h.mutation.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].content, ReplyConfig::default().fallback);
    }

    #[tokio::test]
    async fn test_missing_entry_is_server_error() {
        let h = harness(Some("hi"), false);

        let event = HttpEvent::new("POST").with_body(json!({"object": "whatsapp_business_account"}));
        assert_eq!(h.relay.handle(&event).await, HttpResponse::error());

        let garbage = HttpEvent::new("POST").with_body(json!("{not json"));
        assert_eq!(h.relay.handle(&garbage).await, HttpResponse::error());

        assert_eq!(h.provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_null_body_is_bad_request() {
        let h = harness(Some("hi"), false);

        let event = HttpEvent::new("POST").with_body(json!("null"));
        assert_eq!(h.relay.handle(&event).await, HttpResponse::bad_request());
        assert_eq!(h.provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_mutation_failure_is_server_error() {
        let h = harness(Some("hi"), true);

        let event = HttpEvent::new("POST").with_body(text_delivery());
        assert_eq!(h.relay.handle(&event).await, HttpResponse::error());
    }
}
