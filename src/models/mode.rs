// Conversation modes - the strategies an agent can take for a single turn

use serde::{Deserialize, Serialize};

/// A named conversational strategy with its own prompt template and parse rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationMode {
    Brainstorm,
    Clarify,
    Generate,
    Refine,
    Compare,
    Validate,
    Plan,
}

impl ConversationMode {
    /// Every mode, in tie-break order for intent classification
    pub const ALL: [ConversationMode; 7] = [
        ConversationMode::Brainstorm,
        ConversationMode::Clarify,
        ConversationMode::Generate,
        ConversationMode::Refine,
        ConversationMode::Compare,
        ConversationMode::Validate,
        ConversationMode::Plan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationMode::Brainstorm => "brainstorm",
            ConversationMode::Clarify => "clarify",
            ConversationMode::Generate => "generate",
            ConversationMode::Refine => "refine",
            ConversationMode::Compare => "compare",
            ConversationMode::Validate => "validate",
            ConversationMode::Plan => "plan",
        }
    }

    /// Human-readable name for the UI
    pub fn display_name(&self) -> &'static str {
        match self {
            ConversationMode::Brainstorm => "Brainstorm",
            ConversationMode::Clarify => "Clarify",
            ConversationMode::Generate => "Generate",
            ConversationMode::Refine => "Refine",
            ConversationMode::Compare => "Compare",
            ConversationMode::Validate => "Validate",
            ConversationMode::Plan => "Plan",
        }
    }
}

impl Default for ConversationMode {
    fn default() -> Self {
        ConversationMode::Brainstorm
    }
}

impl std::fmt::Display for ConversationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConversationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ConversationMode::ALL
            .iter()
            .find(|mode| mode.as_str() == normalized)
            .copied()
            .ok_or_else(|| format!("Unknown conversation mode: '{}'", s))
    }
}
