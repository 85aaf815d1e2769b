//! Context accumulator
//!
//! Collects the project title, extracted items, and a bounded tail of the
//! conversation so every prompt sees the same project state. Built per
//! request from the persisted project and dropped afterwards.

use crate::models::{ChatMessage, ConversationContext, Item, ItemType, MessageRole, Project};

#[derive(Debug, Clone)]
pub struct ContextAccumulator {
    context: ConversationContext,
    window: usize,
}

impl ContextAccumulator {
    pub fn new(project_title: impl Into<String>, window: usize) -> Self {
        Self {
            context: ConversationContext {
                project_title: project_title.into(),
                ..Default::default()
            },
            window: window.max(1),
        }
    }

    /// Rebuild the context from persisted project state
    pub fn from_project(project: &Project, window: usize) -> Self {
        let mut accumulator = Self::new(project.title.clone(), window);
        accumulator.append_items(project.items.iter().cloned());

        let skip = project.messages.len().saturating_sub(accumulator.window);
        accumulator.context.recent_messages = project.messages[skip..].to_vec();
        accumulator
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Record a message, dropping the oldest once the window is full
    pub fn record_message(&mut self, role: MessageRole, content: impl Into<String>) {
        self.push_message(ChatMessage::new(role, content));
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        let messages = &mut self.context.recent_messages;
        messages.push(message);
        if messages.len() > self.window {
            let excess = messages.len() - self.window;
            messages.drain(..excess);
        }
    }

    /// Append items in order, split by type. No deduplication happens here.
    pub fn append_items(&mut self, items: impl IntoIterator<Item = Item>) {
        for item in items {
            match item.item_type {
                ItemType::Idea => self.context.ideas.push(item),
                ItemType::Decision => self.context.decisions.push(item),
            }
        }
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn into_context(self) -> ConversationContext {
        self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_empty() {
        let acc = ContextAccumulator::new("Notes app", 10);
        let ctx = acc.context();
        assert_eq!(ctx.project_title, "Notes app");
        assert!(ctx.ideas.is_empty());
        assert!(ctx.decisions.is_empty());
        assert!(ctx.recent_messages.is_empty());
    }

    #[test]
    fn test_record_message_keeps_trailing_window() {
        let mut acc = ContextAccumulator::new("Demo", 3);
        for i in 0..5 {
            acc.record_message(MessageRole::User, format!("m{}", i));
        }
        let contents: Vec<_> = acc
            .context()
            .recent_messages
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn test_append_items_splits_by_type_without_dedupe() {
        let mut acc = ContextAccumulator::new("Demo", 10);
        acc.append_items(vec![
            Item::new("Dark mode", ItemType::Idea),
            Item::new("Use Postgres", ItemType::Decision),
            Item::new("Dark mode", ItemType::Idea),
        ]);
        let ctx = acc.into_context();
        assert_eq!(ctx.ideas.len(), 2);
        assert_eq!(ctx.decisions.len(), 1);
        assert_eq!(ctx.decisions[0].text, "Use Postgres");
    }

    #[test]
    fn test_from_project_restores_state() {
        let mut project = Project::new("Recipes");
        project.items.push(Item::new("Meal planner", ItemType::Idea));
        project.items.push(Item::new("Mobile first", ItemType::Decision));
        for i in 0..12 {
            project
                .messages
                .push(ChatMessage::new(MessageRole::User, format!("m{}", i)));
        }

        let ctx = ContextAccumulator::from_project(&project, 10).into_context();
        assert_eq!(ctx.project_title, "Recipes");
        assert_eq!(ctx.ideas[0].text, "Meal planner");
        assert_eq!(ctx.decisions[0].text, "Mobile first");
        assert_eq!(ctx.recent_messages.len(), 10);
        assert_eq!(ctx.recent_messages[0].content, "m2");
    }

    #[test]
    fn test_zero_window_is_raised_to_one() {
        let mut acc = ContextAccumulator::new("Demo", 0);
        acc.record_message(MessageRole::User, "a");
        acc.record_message(MessageRole::Assistant, "b");
        assert_eq!(acc.window(), 1);
        assert_eq!(acc.context().recent_messages.len(), 1);
    }
}
