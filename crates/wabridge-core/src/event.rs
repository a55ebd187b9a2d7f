//! Invocation event shapes

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use wabridge_channels::MalformedPayload;

/// Outbound invocation: `{"arguments": {"recipient": ..., "content": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendInvocation {
    /// Send request
    pub arguments: SendArguments,
}

/// Outbound send request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendArguments {
    /// Destination identifier
    pub recipient: String,
    /// Message text
    pub content: String,
}

/// HTTP-shaped inbound invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpEvent {
    /// Request method (`GET`, `POST`, ...)
    pub http_method: String,
    /// Query string parameters
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    /// Body: a JSON-encoded string or an already decoded JSON value
    #[serde(default)]
    pub body: Option<Value>,
}

impl HttpEvent {
    /// Create an event with the given method
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            http_method: method.into(),
            ..Default::default()
        }
    }

    /// Add a query parameter
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set the body
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Query parameter value
    #[must_use]
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|q| q.get(key))
            .map(String::as_str)
    }

    /// Whether a non-empty body is present
    #[must_use]
    pub fn has_body(&self) -> bool {
        match &self.body {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// Decode the body, parsing it first if it arrived as a string.
    ///
    /// A body that decodes to JSON `null` counts as no body.
    ///
    /// # Errors
    /// Returns [`MalformedPayload`] if a string body is not valid JSON.
    pub fn decoded_body(&self) -> Result<Option<Value>, MalformedPayload> {
        if !self.has_body() {
            return Ok(None);
        }
        let decoded = match &self.body {
            Some(Value::String(raw)) => serde_json::from_str(raw)
                .map_err(|e| MalformedPayload(format!("body is not JSON: {e}")))?,
            Some(other) => other.clone(),
            None => Value::Null,
        };
        Ok((!decoded.is_null()).then_some(decoded))
    }
}

/// HTTP-shaped response: `{"statusCode": ..., "body": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    /// HTTP status code
    pub status_code: u16,
    /// Plain-text body
    pub body: String,
}

impl HttpResponse {
    /// 200 with the given body
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    /// 200 `"ok"`: delivery acknowledged
    #[must_use]
    pub fn acknowledged() -> Self {
        Self::ok("ok")
    }

    /// 403 `"Verification failed"`
    #[must_use]
    pub fn verification_failed() -> Self {
        Self {
            status_code: 403,
            body: "Verification failed".to_string(),
        }
    }

    /// 400 `"Bad Request"`
    #[must_use]
    pub fn bad_request() -> Self {
        Self {
            status_code: 400,
            body: "Bad Request".to_string(),
        }
    }

    /// 500 `"error"`
    #[must_use]
    pub fn error() -> Self {
        Self {
            status_code: 500,
            body: "error".to_string(),
        }
    }
}
