// Template system for prompt generation

pub mod builtin;
pub mod engine;

pub use engine::{format_item_list, TemplateContext, TemplateEngine};

use crate::agents::mode_spec;
use crate::models::{ConversationContext, ConversationMode};
use anyhow::Result;

/// Builds system prompts from accumulated project state.
///
/// Rendering only reads the context, so the same context always yields the
/// same prompt text.
pub struct PromptBuilder {
    engine: TemplateEngine,
}

impl PromptBuilder {
    /// Create a builder with the built-in templates loaded
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::with_builtins()?,
        })
    }

    /// Override or add a template, e.g. from a user templates directory
    pub fn with_template(self, name: &str, content: &str) -> Result<Self> {
        self.engine.add_template(name, content)?;
        Ok(self)
    }

    /// Render the project context block: title, ideas, and decisions
    pub fn build_prompt(&self, ctx: &ConversationContext) -> Result<String> {
        let context = TemplateContext::from_conversation(ctx);
        self.engine.render(builtin::PROJECT_CONTEXT, &context)
    }

    /// Render the project context followed by the instructions for `mode`
    pub fn build_mode_prompt(
        &self,
        mode: ConversationMode,
        ctx: &ConversationContext,
    ) -> Result<String> {
        let context = TemplateContext::from_conversation(ctx);
        let mut prompt = self.engine.render(builtin::PROJECT_CONTEXT, &context)?;
        let instructions = self.engine.render(mode_spec(mode).template, &context)?;
        prompt.push_str(&instructions);
        Ok(prompt)
    }
}

/// Convenience function to render the project context prompt
pub fn build_prompt(ctx: &ConversationContext) -> Result<String> {
    PromptBuilder::new()?.build_prompt(ctx)
}
