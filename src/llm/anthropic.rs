//! Anthropic Messages API client
//!
//! Plain request/response calls only; no streaming and no retries. Retry
//! policy belongs to callers.

use super::{CompletionRequest, LlmClient, LlmError, LlmMessage};
use crate::models::MessageRole;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Default Anthropic API base URL
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default model when none is configured
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";

/// Maximum number of body characters kept in error messages
const ERROR_BODY_LIMIT: usize = 500;

pub struct AnthropicClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout_ms: u64,
    client: reqwest::Client,
}

impl AnthropicClient {
    /// Create a client. A missing key is reported on the first call,
    /// so the server can still start and serve non-LLM commands.
    pub fn new(api_key: Option<String>, model: Option<String>, timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: ANTHROPIC_BASE_URL.to_string(),
            timeout_ms,
            client,
        }
    }

    /// Point the client at a different host (proxies, compatible providers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    /// Build the JSON body for the Messages API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let messages: Vec<serde_json::Value> = request
            .messages
            .iter()
            .filter_map(message_to_anthropic)
            .collect();

        serde_json::json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "system": request.system,
            "messages": messages,
        })
    }
}

/// The Messages API only accepts non-empty user/assistant turns; system
/// text travels in the top-level `system` field.
fn message_to_anthropic(message: &LlmMessage) -> Option<serde_json::Value> {
    if message.content.trim().is_empty() {
        return None;
    }
    let role = match message.role {
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
        MessageRole::System => return None,
    };
    Some(serde_json::json!({
        "role": role,
        "content": message.content,
    }))
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

/// Join the text blocks of a Messages API response
fn extract_text(body: &str) -> Result<String, LlmError> {
    let response: MessagesResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Decode(e.to_string()))?;

    let text = response
        .content
        .into_iter()
        .filter(|block| block.block_type == "text")
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join("");

    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(text)
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_LIMIT {
        return body.to_string();
    }
    let truncated: String = body.chars().take(ERROR_BODY_LIMIT).collect();
    format!("{}...", truncated)
}

#[async_trait]
impl LlmClient for AnthropicClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingApiKey("Anthropic"))?;

        let body = self.build_request_body(&request);
        log::debug!(
            "Sending completion request: model={}, messages={}, max_tokens={}",
            self.model,
            request.messages.len(),
            request.max_tokens
        );

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout_ms)
                } else {
                    LlmError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        extract_text(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AnthropicClient {
        AnthropicClient::new(Some("test-key".to_string()), None, 10_000)
    }

    #[test]
    fn test_build_request_body_moves_system_out_of_history() {
        let request = CompletionRequest {
            system: "You are helpful".to_string(),
            messages: vec![
                LlmMessage {
                    role: MessageRole::System,
                    content: "ignored".to_string(),
                },
                LlmMessage::user("Hi"),
                LlmMessage::assistant("Hello"),
            ],
            max_tokens: 512,
        };

        let body = client().build_request_body(&request);
        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["max_tokens"], 512);
        assert_eq!(body["system"], "You are helpful");

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[1]["content"], "Hello");
    }

    #[test]
    fn test_build_request_body_skips_blank_turns() {
        let request = CompletionRequest {
            system: String::new(),
            messages: vec![
                LlmMessage::user("brainstorm ideas please"),
                LlmMessage::assistant(""),
                LlmMessage::user("more please now"),
            ],
            max_tokens: 256,
        };

        let body = client().build_request_body(&request);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m["role"] == "user"));
    }

    #[test]
    fn test_extract_text_joins_text_blocks() {
        let body = r#"{"content":[{"type":"text","text":"Hello "},{"type":"tool_use","id":"x"},{"type":"text","text":"world"}]}"#;
        assert_eq!(extract_text(body).unwrap(), "Hello world");
    }

    #[test]
    fn test_extract_text_empty_is_error() {
        let body = r#"{"content":[]}"#;
        assert!(matches!(extract_text(body), Err(LlmError::EmptyResponse)));
    }

    #[test]
    fn test_extract_text_invalid_json_is_decode_error() {
        assert!(matches!(extract_text("not json"), Err(LlmError::Decode(_))));
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let client = AnthropicClient::new(Some("  ".to_string()), None, 10_000);
        assert!(!client.has_api_key());
    }

    #[tokio::test]
    async fn test_complete_without_api_key_fails_fast() {
        let client = AnthropicClient::new(None, Some("custom-model".to_string()), 10_000);
        assert_eq!(client.model(), "custom-model");

        let result = client
            .complete(CompletionRequest {
                system: String::new(),
                messages: vec![LlmMessage::user("Hi")],
                max_tokens: 256,
            })
            .await;
        assert!(matches!(result, Err(LlmError::MissingApiKey("Anthropic"))));
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let client = client().with_base_url("http://localhost:8080/");
        assert_eq!(client.messages_url(), "http://localhost:8080/v1/messages");
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(600);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), ERROR_BODY_LIMIT + 3);
        assert_eq!(truncate_body("short"), "short");
    }
}
