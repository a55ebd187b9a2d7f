//! wabridge LLM - chat-completion provider abstraction
//!
//! - `LlmProvider`: the completion seam used by the reply generator
//! - `OpenAiProvider`: OpenAI (and compatible) chat completions via async-openai

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod completion;
pub mod error;
pub mod message;
pub mod openai;
pub mod provider;
pub mod util;

pub use completion::{CompletionRequest, CompletionResponse, TokenUsage};
pub use error::{Error, Result};
pub use message::{Message, MessageRole};
pub use openai::{OpenAiConfig, OpenAiProvider};
pub use provider::LlmProvider;
