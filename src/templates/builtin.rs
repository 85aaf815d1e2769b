// Built-in prompt templates

use std::collections::HashMap;

/// Placeholder rendered for an empty idea or decision list
pub const EMPTY_LIST_PLACEHOLDER: &str = "(none yet)";

/// Built-in template names
pub const PROJECT_CONTEXT: &str = "project_context";
pub const MODE_BRAINSTORM: &str = "mode_brainstorm";
pub const MODE_CLARIFY: &str = "mode_clarify";
pub const MODE_GENERATE: &str = "mode_generate";
pub const MODE_REFINE: &str = "mode_refine";
pub const MODE_COMPARE: &str = "mode_compare";
pub const MODE_VALIDATE: &str = "mode_validate";
pub const MODE_PLAN: &str = "mode_plan";

/// Get all built-in templates
pub fn get_builtin_templates() -> HashMap<String, String> {
    let mut templates = HashMap::new();

    templates.insert(
        PROJECT_CONTEXT.to_string(),
        PROJECT_CONTEXT_TEMPLATE.to_string(),
    );
    templates.insert(
        MODE_BRAINSTORM.to_string(),
        MODE_BRAINSTORM_TEMPLATE.to_string(),
    );
    templates.insert(MODE_CLARIFY.to_string(), MODE_CLARIFY_TEMPLATE.to_string());
    templates.insert(
        MODE_GENERATE.to_string(),
        MODE_GENERATE_TEMPLATE.to_string(),
    );
    templates.insert(MODE_REFINE.to_string(), MODE_REFINE_TEMPLATE.to_string());
    templates.insert(MODE_COMPARE.to_string(), MODE_COMPARE_TEMPLATE.to_string());
    templates.insert(
        MODE_VALIDATE.to_string(),
        MODE_VALIDATE_TEMPLATE.to_string(),
    );
    templates.insert(MODE_PLAN.to_string(), MODE_PLAN_TEMPLATE.to_string());

    templates
}

/// Get a specific built-in template
pub fn get_builtin_template(name: &str) -> Option<&'static str> {
    match name {
        PROJECT_CONTEXT => Some(PROJECT_CONTEXT_TEMPLATE),
        MODE_BRAINSTORM => Some(MODE_BRAINSTORM_TEMPLATE),
        MODE_CLARIFY => Some(MODE_CLARIFY_TEMPLATE),
        MODE_GENERATE => Some(MODE_GENERATE_TEMPLATE),
        MODE_REFINE => Some(MODE_REFINE_TEMPLATE),
        MODE_COMPARE => Some(MODE_COMPARE_TEMPLATE),
        MODE_VALIDATE => Some(MODE_VALIDATE_TEMPLATE),
        MODE_PLAN => Some(MODE_PLAN_TEMPLATE),
        _ => None,
    }
}

const PROJECT_CONTEXT_TEMPLATE: &str = r#"You are a creative brainstorming partner helping a user develop the project "{{ project_title }}".

Ideas captured so far:
{{ ideas }}

Decisions made so far:
{{ decisions }}
"#;

const MODE_BRAINSTORM_TEMPLATE: &str = r#"
## Mode: Brainstorm

Build on the user's message with fresh, specific ideas. Favor variety over depth and
avoid repeating ideas that are already captured above.

Reply conversationally first. Then list every new idea inside a single block:

<ideas>
- First new idea
- Second new idea
</ideas>

Omit the block entirely if you have no new ideas.
"#;

const MODE_CLARIFY_TEMPLATE: &str = r#"
## Mode: Clarify

The user's intent is not yet clear. Ask at most three short, focused questions that
would most help narrow down what they want. Do not propose ideas or decisions yet.
"#;

const MODE_GENERATE_TEMPLATE: &str = r#"
## Mode: Generate

Produce a concrete set of ideas that directly answers the user's request. Each idea
should be one line and actionable.

Briefly introduce the list, then put the ideas inside a single block:

<ideas>
- Idea one
- Idea two
</ideas>
"#;

const MODE_REFINE_TEMPLATE: &str = r#"
## Mode: Refine

Improve the ideas the user is pointing at. Sharpen wording, merge overlaps, and make
each idea more specific. Explain the changes in a sentence or two.

List the refined versions as new ideas inside a single block:

<ideas>
- Refined idea
</ideas>
"#;

const MODE_COMPARE_TEMPLATE: &str = r#"
## Mode: Compare

Compare the options the user mentions (or the most relevant captured ideas). Weigh
trade-offs such as effort, impact, and risk, and give a clear recommendation.

If the user has effectively chosen an option, record it inside a single block:

<decisions>
- The chosen option and why
</decisions>
"#;

const MODE_VALIDATE_TEMPLATE: &str = r#"
## Mode: Validate

Stress-test the idea under discussion. Point out assumptions, risks, and open questions,
and suggest the quickest way to check each one. Do not add new ideas or decisions.
"#;

const MODE_PLAN_TEMPLATE: &str = r#"
## Mode: Plan

Turn the captured ideas and decisions into an ordered, practical plan of next steps.

Record any commitments the plan depends on inside a single block:

<decisions>
- A decision the plan relies on
</decisions>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_map_matches_lookup() {
        let templates = get_builtin_templates();
        assert_eq!(templates.len(), 8);
        for (name, content) in &templates {
            assert_eq!(get_builtin_template(name), Some(content.as_str()));
        }
    }

    #[test]
    fn test_extracting_modes_instruct_tags() {
        assert!(MODE_BRAINSTORM_TEMPLATE.contains("<ideas>"));
        assert!(MODE_GENERATE_TEMPLATE.contains("<ideas>"));
        assert!(MODE_PLAN_TEMPLATE.contains("<decisions>"));
        assert!(!MODE_CLARIFY_TEMPLATE.contains("<ideas>"));
    }
}
