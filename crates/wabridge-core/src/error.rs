//! Error types for wabridge-core
//!
//! Completion failures are the only recoverable kind: the reply generator
//! substitutes a fixed apology. Everything else aborts the invocation.

use thiserror::Error;

/// Relay error type
#[derive(Debug, Error)]
pub enum Error {
    /// Webhook body without the delivery shape
    #[error(transparent)]
    MalformedPayload(#[from] wabridge_channels::MalformedPayload),

    /// Messaging platform error
    #[error("channel error: {0}")]
    Channel(#[from] wabridge_channels::Error),

    /// Message store error
    #[error("store error: {0}")]
    Store(#[from] wabridge_store::Error),

    /// Completion API error
    #[error("completion error: {0}")]
    Completion(#[from] wabridge_llm::Error),

    /// GraphQL endpoint error
    #[error("graphql error: {0}")]
    Graphql(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Whether the pipeline may continue with a substitute value
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Completion(_))
    }

    /// HTTP status for this error: 502 when an upstream service failed,
    /// 500 otherwise
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Channel(_) | Self::Completion(_) | Self::Graphql(_) => 502,
            Self::MalformedPayload(_) | Self::Store(_) | Self::Configuration(_) => 500,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_completion_is_recoverable() {
        assert!(Error::Completion(wabridge_llm::Error::Api("down".into())).is_recoverable());
        assert!(!Error::Graphql("denied".into()).is_recoverable());
        assert!(!Error::Store(wabridge_store::Error::Database("locked".into())).is_recoverable());
    }

    #[test]
    fn test_status_codes() {
        let malformed = wabridge_channels::MalformedPayload("no entry".into());
        assert_eq!(Error::from(malformed).status_code(), 500);
        assert_eq!(
            Error::Channel(wabridge_channels::Error::Network("reset".into())).status_code(),
            502
        );
        assert_eq!(Error::Graphql("401".into()).status_code(), 502);
        assert_eq!(
            Error::Store(wabridge_store::Error::Database("full".into())).status_code(),
            500
        );
    }
}
