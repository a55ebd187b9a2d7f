//! Automated reply generation

use crate::config::ReplyConfig;
use crate::error::Result;
use std::sync::Arc;
use tracing::{debug, warn};
use wabridge_llm::{CompletionRequest, LlmProvider, Message};

/// Generates replies to inbound texts through a completion provider
pub struct ReplyGenerator {
    provider: Arc<dyn LlmProvider>,
    config: ReplyConfig,
}

impl ReplyGenerator {
    /// Create a reply generator
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, config: ReplyConfig) -> Self {
        Self { provider, config }
    }

    /// Ask the provider for a reply, propagating failures
    pub async fn try_generate(&self, text: &str) -> Result<String> {
        let request = CompletionRequest::new(self.provider.default_model())
            .with_message(Message::system(&self.config.system_prompt))
            .with_message(Message::user(text))
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens);

        let response = self.provider.complete(request).await?;
        debug!(model = %response.model, usage = ?response.usage, "Reply generated");

        Ok(response.content.trim().to_string())
    }

    /// Generate a reply; any completion failure yields the configured apology
    pub async fn generate(&self, text: &str) -> String {
        match self.try_generate(text).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "Completion failed, sending fallback reply"
                );
                self.config.fallback.clone()
            }
        }
    }
}
