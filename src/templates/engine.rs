// Template rendering engine using Tera

use super::builtin::{self, EMPTY_LIST_PLACEHOLDER};
use crate::models::{ConversationContext, Item};
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::sync::Mutex;
use tera::{Context, Tera};

/// Values substituted into the project context template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateContext {
    pub project_title: String,
    /// Pre-formatted bullet list, or the empty-list placeholder
    pub ideas: String,
    /// Pre-formatted bullet list, or the empty-list placeholder
    pub decisions: String,
}

impl TemplateContext {
    /// Build template values from accumulated conversation state
    pub fn from_conversation(ctx: &ConversationContext) -> Self {
        Self {
            project_title: ctx.project_title.clone(),
            ideas: format_item_list(&ctx.ideas),
            decisions: format_item_list(&ctx.decisions),
        }
    }

    /// Convert to Tera context
    pub fn to_tera_context(&self) -> Result<Context> {
        Context::from_serialize(self).map_err(|e| anyhow!("Failed to build context: {}", e))
    }
}

/// Render items as `- text` lines in their original order
pub fn format_item_list(items: &[Item]) -> String {
    if items.is_empty() {
        return EMPTY_LIST_PLACEHOLDER.to_string();
    }
    items
        .iter()
        .map(|item| format!("- {}", item.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Template engine for rendering prompts
pub struct TemplateEngine {
    /// Tera instance with cached templates
    tera: Mutex<Tera>,
}

impl TemplateEngine {
    /// Create a new template engine
    pub fn new() -> Self {
        Self {
            tera: Mutex::new(Tera::default()),
        }
    }

    /// Create an engine with every built-in template registered
    pub fn with_builtins() -> Result<Self> {
        let engine = Self::new();
        for (name, content) in builtin::get_builtin_templates() {
            engine.add_template(&name, &content)?;
        }
        Ok(engine)
    }

    /// Add a template from string
    pub fn add_template(&self, name: &str, template: &str) -> Result<()> {
        let mut tera = self.tera.lock().map_err(|e| anyhow!("Lock error: {}", e))?;
        tera.add_raw_template(name, template)
            .map_err(|e| anyhow!("Failed to add template '{}': {}", name, e))?;
        Ok(())
    }

    /// Render a template with context
    pub fn render(&self, template_name: &str, context: &TemplateContext) -> Result<String> {
        let tera = self.tera.lock().map_err(|e| anyhow!("Lock error: {}", e))?;
        let ctx = context.to_tera_context()?;

        tera.render(template_name, &ctx)
            .map_err(|e| anyhow!("Failed to render template '{}': {}", template_name, e))
    }

    /// Check if a template exists
    pub fn has_template(&self, name: &str) -> bool {
        let tera = self.tera.lock().ok();
        tera.map(|t| t.get_template_names().any(|n| n == name))
            .unwrap_or(false)
    }

    /// Get list of template names
    pub fn template_names(&self) -> Vec<String> {
        let tera = self.tera.lock().ok();
        let mut names: Vec<String> = tera
            .map(|t| t.get_template_names().map(|s| s.to_string()).collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;

    #[test]
    fn test_format_item_list_empty_uses_placeholder() {
        assert_eq!(format_item_list(&[]), "(none yet)");
    }

    #[test]
    fn test_format_item_list_preserves_order() {
        let items = vec![
            Item::new("Second thought", ItemType::Idea),
            Item::new("First thought", ItemType::Idea),
        ];
        assert_eq!(
            format_item_list(&items),
            "- Second thought\n- First thought"
        );
    }

    #[test]
    fn test_renders_custom_template() {
        let engine = TemplateEngine::new();
        engine
            .add_template("greeting", "Project: {{ project_title }}")
            .unwrap();

        let context = TemplateContext {
            project_title: "Garden Planner".to_string(),
            ideas: String::new(),
            decisions: String::new(),
        };
        let rendered = engine.render("greeting", &context).unwrap();
        assert_eq!(rendered, "Project: Garden Planner");
    }

    #[test]
    fn test_does_not_escape_markup_in_values() {
        let engine = TemplateEngine::new();
        engine.add_template("raw", "{{ project_title }}").unwrap();

        let context = TemplateContext {
            project_title: "R&D <Lab>".to_string(),
            ideas: String::new(),
            decisions: String::new(),
        };
        assert_eq!(engine.render("raw", &context).unwrap(), "R&D <Lab>");
    }

    #[test]
    fn test_render_unknown_template_fails() {
        let engine = TemplateEngine::new();
        let context = TemplateContext::from_conversation(&ConversationContext::default());
        let result = engine.render("missing", &context);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("missing"));
    }

    #[test]
    fn test_with_builtins_registers_all() {
        let engine = TemplateEngine::with_builtins().unwrap();
        assert!(engine.has_template(builtin::PROJECT_CONTEXT));
        assert_eq!(engine.template_names().len(), 8);
    }

    #[test]
    fn test_invalid_template_syntax_rejected() {
        let engine = TemplateEngine::new();
        assert!(engine.add_template("broken", "{{ unclosed").is_err());
    }
}
