// Conversation models shared by the dispatcher, storage, and HTTP layers

use super::ConversationMode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            "system" => Ok(MessageRole::System),
            _ => Err(format!(
                "Invalid message role: '{}'. Expected 'user', 'assistant', or 'system'",
                s
            )),
        }
    }
}

/// A single conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: String,
}

impl ChatMessage {
    /// Create a message stamped with a fresh id and the current time
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// ============================================================================
// Items
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Idea,
    Decision,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Idea => "idea",
            ItemType::Decision => "decision",
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idea" | "ideas" => Ok(ItemType::Idea),
            "decision" | "decisions" => Ok(ItemType::Decision),
            _ => Err(format!("Invalid item type: '{}'", s)),
        }
    }
}

/// A discrete idea or decision extracted from a model reply.
/// Items are never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub created_at: String,
    /// Mode whose reply produced this item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_mode: Option<ConversationMode>,
}

impl Item {
    pub fn new(text: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            item_type,
            created_at: chrono::Utc::now().to_rfc3339(),
            source_mode: None,
        }
    }

    pub fn with_source_mode(mut self, mode: ConversationMode) -> Self {
        self.source_mode = Some(mode);
        self
    }

    /// Key used for idempotent storage: trimmed, lowercased, single-spaced
    pub fn normalized_text(&self) -> String {
        normalize_item_text(&self.text)
    }
}

/// Normalize item text for duplicate detection
pub fn normalize_item_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ============================================================================
// Context and Responses
// ============================================================================

/// Accumulated project state threaded into every prompt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationContext {
    pub project_title: String,
    pub ideas: Vec<Item>,
    pub decisions: Vec<Item>,
    pub recent_messages: Vec<ChatMessage>,
}

/// Result of a single mode dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeResponse {
    /// User-visible text with structured blocks removed
    pub message: String,
    pub extracted_items: Vec<Item>,
    pub mode: ConversationMode,
}

// ============================================================================
// Persisted Project
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub created_at: String,
    pub updated_at: String,
}

impl Project {
    pub fn new(title: impl Into<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            items: Vec::new(),
            messages: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn items_of_type(&self, item_type: ItemType) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |i| i.item_type == item_type)
    }
}
