//! Mode dispatcher
//!
//! Builds the mode-specific prompt from accumulated context, sends one
//! completion request, and turns the reply into a [`ModeResponse`].

use super::modes::mode_spec;
use crate::config::ScoringConfig;
use crate::llm::{CompletionRequest, LlmClient, LlmError, LlmMessage};
use crate::models::{
    ConversationContext, ConversationMode, Item, ItemType, MessageRole, ModeResponse,
};
use crate::templates::PromptBuilder;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Failed to build prompt for {mode} mode: {message}")]
    Prompt {
        mode: ConversationMode,
        message: String,
    },

    #[error("LLM call failed in {mode} mode: {source}")]
    Llm {
        mode: ConversationMode,
        #[source]
        source: LlmError,
    },
}

pub struct ModeDispatcher {
    prompts: PromptBuilder,
    config: Arc<ScoringConfig>,
}

impl ModeDispatcher {
    pub fn new(config: Arc<ScoringConfig>) -> anyhow::Result<Self> {
        Ok(Self {
            prompts: PromptBuilder::new()?,
            config,
        })
    }

    /// Use a custom prompt builder (e.g. with overridden templates)
    pub fn with_prompt_builder(prompts: PromptBuilder, config: Arc<ScoringConfig>) -> Self {
        Self { prompts, config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Last `context_window` context messages followed by the new user message.
    ///
    /// Blank messages are dropped and the history always opens on a user
    /// turn, so an odd window never leads with an assistant reply.
    pub fn build_history(&self, ctx: &ConversationContext, user_message: &str) -> Vec<LlmMessage> {
        let window = self.config.context_window;
        let skip = ctx.recent_messages.len().saturating_sub(window);

        let mut history: Vec<LlmMessage> = ctx
            .recent_messages
            .iter()
            .skip(skip)
            .filter(|m| !m.content.trim().is_empty())
            .skip_while(|m| m.role != MessageRole::User)
            .map(LlmMessage::from)
            .collect();
        history.push(LlmMessage::user(user_message));
        history
    }

    /// Build the completion request for a mode without sending it
    pub fn build_request(
        &self,
        mode: ConversationMode,
        user_message: &str,
        ctx: &ConversationContext,
    ) -> Result<CompletionRequest, DispatchError> {
        let system = self
            .prompts
            .build_mode_prompt(mode, ctx)
            .map_err(|e| DispatchError::Prompt {
                mode,
                message: e.to_string(),
            })?;

        Ok(CompletionRequest {
            system,
            messages: self.build_history(ctx, user_message),
            max_tokens: self.config.max_tokens,
        })
    }

    /// Run one turn in `mode`.
    ///
    /// Exactly one LLM call is made. Failures propagate to the caller
    /// unchanged and are not retried here.
    pub async fn dispatch(
        &self,
        mode: ConversationMode,
        user_message: &str,
        ctx: &ConversationContext,
        client: &dyn LlmClient,
    ) -> Result<ModeResponse, DispatchError> {
        let spec = mode_spec(mode);
        let request = self.build_request(mode, user_message, ctx)?;

        log::info!(
            "Dispatching {} mode for '{}' ({} history messages, model {})",
            mode,
            ctx.project_title,
            request.messages.len(),
            client.model()
        );

        let reply = client.complete(request).await.map_err(|source| {
            log::error!("LLM call failed in {} mode: {}", mode, source);
            DispatchError::Llm { mode, source }
        })?;

        let parsed = spec.parse_rule.apply(&reply);
        let extracted_items: Vec<Item> = match spec.item_type() {
            Some(item_type) => parsed
                .items
                .into_iter()
                .map(|text| Item::new(text, item_type).with_source_mode(mode))
                .collect(),
            None => Vec::new(),
        };

        if !extracted_items.is_empty() {
            log::info!(
                "Extracted {} item(s) in {} mode",
                extracted_items.len(),
                mode
            );
        }

        // A reply holding only the tagged block leaves no visible text
        let message = if parsed.message.is_empty() {
            block_only_message(extracted_items.len(), spec.item_type())
        } else {
            parsed.message
        };

        Ok(ModeResponse {
            message,
            extracted_items,
            mode,
        })
    }
}

/// Visible text for a reply that carried nothing but its item block
fn block_only_message(count: usize, item_type: Option<ItemType>) -> String {
    match item_type {
        Some(ItemType::Idea) => format!("Added {} idea(s).", count),
        Some(ItemType::Decision) => format!("Recorded {} decision(s).", count),
        None => "(no response text)".to_string(),
    }
}
