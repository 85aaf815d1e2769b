// Command request/response types

use crate::agents::IntentClassification;
use crate::models::{ChatMessage, ConversationMode, Item, ItemType};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Longest message accepted from a client, in characters
pub const MAX_MESSAGE_CHARS: usize = 20_000;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub project_id: String,
    pub content: String,
    /// Explicit mode; when absent the intent classifier picks one
    #[serde(default)]
    pub mode: Option<String>,
}

impl SendMessageRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err("Message content cannot be empty".to_string());
        }
        let chars = self.content.chars().count();
        if chars > MAX_MESSAGE_CHARS {
            return Err(format!(
                "Message is too long: {} characters (max {})",
                chars, MAX_MESSAGE_CHARS
            ));
        }
        self.explicit_mode()?;
        Ok(())
    }

    /// Parse the requested mode, if any
    pub fn explicit_mode(&self) -> Result<Option<ConversationMode>, String> {
        match self.mode.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(mode) => ConversationMode::from_str(mode).map(Some),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub user_message: ChatMessage,
    /// Assistant reply with structured blocks removed
    pub message: ChatMessage,
    pub mode: ConversationMode,
    /// Items stored by this turn (duplicates of existing items are omitted)
    pub new_items: Vec<Item>,
    /// Present when the mode was chosen by the classifier
    pub intent: Option<IntentClassification>,
}

/// Lightweight project listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub title: String,
    pub idea_count: usize,
    pub decision_count: usize,
    pub message_count: usize,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeInfo {
    pub mode: ConversationMode,
    pub display_name: String,
    /// Item type the mode extracts, if any
    pub item_type: Option<ItemType>,
    pub keywords: Vec<String>,
}
