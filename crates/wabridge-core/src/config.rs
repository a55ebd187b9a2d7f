//! Relay configuration
//!
//! Built once at process start and passed by reference to the relay
//! constructors. Core logic never reads the environment.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use wabridge_channels::WhatsAppBusinessConfig;
use wabridge_llm::OpenAiConfig;

/// Default system instruction for automated replies
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "Eres un asistente conversacional amable y conciso para WhatsApp.";

/// Reply sent when the completion API fails
pub const DEFAULT_FALLBACK_REPLY: &str =
    "Lo siento, ocurrió un error procesando tu mensaje. Intenta nuevamente más tarde.";

/// Automated reply settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReplyConfig {
    /// System instruction sent with every completion
    pub system_prompt: String,
    /// Apology substituted when the completion fails
    pub fallback: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Reply length bound, in tokens
    pub max_tokens: u32,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            fallback: DEFAULT_FALLBACK_REPLY.to_string(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

/// GraphQL mutation endpoint
#[derive(Clone, Deserialize)]
pub struct GraphqlConfig {
    /// Endpoint URL
    pub endpoint: String,
    /// Value of the `x-api-key` header
    pub api_key: String,
}

impl fmt::Debug for GraphqlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphqlConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GraphqlConfig {
    /// Create a GraphQL endpoint configuration
    #[must_use]
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

/// Everything both relays need
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Messaging platform credentials and webhook secret
    pub whatsapp: WhatsAppBusinessConfig,
    /// Completion API
    pub openai: OpenAiConfig,
    /// Automated reply settings
    pub reply: ReplyConfig,
    /// GraphQL mutation endpoint
    pub graphql: GraphqlConfig,
    /// Table the outbound records are written to
    pub message_table: String,
}

impl RelayConfig {
    /// Check everything both relays need
    ///
    /// # Errors
    /// Returns an error naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.validate_outbound()?;
        self.validate_inbound()
    }

    /// Check the settings used by the outbound relay
    ///
    /// # Errors
    /// Returns an error naming the first offending field.
    pub fn validate_outbound(&self) -> Result<()> {
        require("whatsapp.access_token", &self.whatsapp.access_token)?;
        require("whatsapp.phone_number_id", &self.whatsapp.phone_number_id)?;
        wabridge_store::validate_table_name(&self.message_table)?;
        Ok(())
    }

    /// Check the settings used by the inbound relay
    ///
    /// # Errors
    /// Returns an error naming the first offending field.
    pub fn validate_inbound(&self) -> Result<()> {
        require(
            "whatsapp.webhook_verify_token",
            &self.whatsapp.webhook_verify_token,
        )?;
        require("openai.api_key", &self.openai.api_key)?;
        require("graphql.endpoint", &self.graphql.endpoint)?;
        require("graphql.api_key", &self.graphql.api_key)?;

        reqwest::Url::parse(&self.graphql.endpoint)
            .map_err(|e| Error::Configuration(format!("graphql.endpoint: {e}")))?;

        if !(0.0..=2.0).contains(&self.reply.temperature) {
            return Err(Error::Configuration(
                "reply.temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Configuration(format!("{field} is not set")));
    }
    Ok(())
}
