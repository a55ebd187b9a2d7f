//! Server configuration types

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use wabridge_channels::WhatsAppBusinessConfig;
use wabridge_core::{GraphqlConfig, RelayConfig, ReplyConfig};
use wabridge_llm::OpenAiConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub whatsapp: WhatsAppBusinessConfig,
    pub store: StoreConfig,
    pub openai: OpenAiSettings,
    #[serde(default)]
    pub reply: ReplyConfig,
    pub graphql: GraphqlConfig,
}

impl AppConfig {
    /// Explicit relay configuration handed to the relay constructors
    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            whatsapp: self.whatsapp.clone(),
            openai: self.openai.to_openai_config(),
            reply: self.reply.clone(),
            graphql: self.graphql.clone(),
            message_table: self.store.table.clone(),
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Message store settings
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file
    pub path: PathBuf,
    /// Table receiving message records
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    "messages".to_string()
}

/// OpenAI settings
#[derive(Clone, Deserialize)]
pub struct OpenAiSettings {
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    wabridge_llm::openai::DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    wabridge_llm::openai::DEFAULT_TIMEOUT.as_secs()
}

impl fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl OpenAiSettings {
    fn to_openai_config(&self) -> OpenAiConfig {
        let config = OpenAiConfig::new(&self.api_key)
            .with_model(&self.model)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        match self.base_url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }
}
