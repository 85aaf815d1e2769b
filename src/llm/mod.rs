//! LLM client abstraction
//!
//! The dispatcher only needs a single capability from the model provider:
//! turn a system prompt plus message history into reply text. Providers
//! implement [`LlmClient`]; tests substitute an in-memory double.

pub mod anthropic;

pub use anthropic::AnthropicClient;

use crate::models::{ChatMessage, MessageRole};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by an LLM provider call
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("No API key configured for {0}")]
    MissingApiKey(&'static str),

    #[error("Request to LLM provider failed: {0}")]
    Transport(String),

    #[error("LLM request timed out after {0} ms")]
    Timeout(u64),

    #[error("LLM provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode LLM response: {0}")]
    Decode(String),

    #[error("LLM response contained no text")]
    EmptyResponse,
}

/// A message in the provider-facing history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: MessageRole,
    pub content: String,
}

impl LlmMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<&ChatMessage> for LlmMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// One request/response completion call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system: String,
    pub messages: Vec<LlmMessage>,
    pub max_tokens: u32,
}

/// Capability to complete a prompt with a hosted model
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Model identifier sent with each request
    fn model(&self) -> &str;

    /// Send the prompt and history, returning the reply text
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}
