//! GraphQL mutation client
//!
//! Forwards generated replies to the `receiveMessage` mutation of an
//! API-key protected GraphQL endpoint.

use crate::config::GraphqlConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// The `receiveMessage` mutation document
pub const RECEIVE_MESSAGE_MUTATION: &str = r#"
mutation ReceiveMessage($sender: String!, $content: String!, $messageId: ID!) {
  receiveMessage(sender: $sender, content: $content, messageId: $messageId) {
    id sender recipient content timestamp
  }
}
"#;

/// Variables of the `receiveMessage` mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveMessage {
    /// Sender's WhatsApp id
    pub sender: String,
    /// Reply text
    pub content: String,
    /// Id of the inbound WhatsApp message
    pub message_id: String,
}

/// Sink for `receiveMessage` mutations
#[async_trait::async_trait]
pub trait MessageMutation: Send + Sync {
    /// Submit the mutation
    async fn receive_message(&self, variables: &ReceiveMessage) -> Result<()>;
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'static str,
    variables: &'a ReceiveMessage,
}

#[derive(Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

/// HTTP client for the GraphQL endpoint
pub struct GraphqlClient {
    config: GraphqlConfig,
    client: reqwest::Client,
}

impl GraphqlClient {
    /// Create a new client
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: GraphqlConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Graphql(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }
}

#[async_trait::async_trait]
impl MessageMutation for GraphqlClient {
    #[instrument(skip(self, variables), fields(message_id = %variables.message_id))]
    async fn receive_message(&self, variables: &ReceiveMessage) -> Result<()> {
        let body = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", &self.config.api_key)
            .json(&GraphqlRequest {
                query: RECEIVE_MESSAGE_MUTATION,
                variables,
            })
            .send()
            .await
            .map_err(|e| Error::Graphql(format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::Graphql(format!("request rejected: {e}")))?
            .bytes()
            .await
            .map_err(|e| Error::Graphql(format!("failed to read response: {e}")))?;

        // Only a JSON body can carry `errors`; any other 2xx body is accepted.
        if let Ok(response) = serde_json::from_slice::<GraphqlResponse>(&body) {
            if !response.errors.is_empty() {
                let messages: Vec<String> =
                    response.errors.into_iter().map(|e| e.message).collect();
                return Err(Error::Graphql(messages.join("; ")));
            }
        }

        debug!("receiveMessage mutation accepted");
        Ok(())
    }
}
