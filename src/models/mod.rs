// Data models for projects, conversations, and extracted items

pub mod conversation;
pub mod mode;

pub use conversation::{
    normalize_item_text, ChatMessage, ConversationContext, Item, ItemType, MessageRole,
    ModeResponse, Project,
};
pub use mode::ConversationMode;
