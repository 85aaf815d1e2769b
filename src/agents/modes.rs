// Mode table - maps each conversation mode to its template and parse rule

use crate::models::{ConversationMode, ItemType};
use crate::parsers::ParseRule;
use crate::templates::builtin;
use serde::Serialize;

/// How a mode prompts the model and what it pulls out of the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeSpec {
    pub mode: ConversationMode,
    /// Built-in template name with the mode instructions
    pub template: &'static str,
    pub parse_rule: ParseRule,
    /// Keywords that push intent classification toward this mode
    pub keywords: &'static [&'static str],
}

impl ModeSpec {
    /// Type assigned to items this mode extracts
    pub fn item_type(&self) -> Option<ItemType> {
        match self.parse_rule {
            ParseRule::Ideas => Some(ItemType::Idea),
            ParseRule::Decisions => Some(ItemType::Decision),
            ParseRule::None => None,
        }
    }
}

/// One entry per mode, in `ConversationMode::ALL` order
pub static MODE_TABLE: [ModeSpec; 7] = [
    ModeSpec {
        mode: ConversationMode::Brainstorm,
        template: builtin::MODE_BRAINSTORM,
        parse_rule: ParseRule::Ideas,
        keywords: &["brainstorm", "ideas", "what if", "possibilities", "explore"],
    },
    ModeSpec {
        mode: ConversationMode::Clarify,
        template: builtin::MODE_CLARIFY,
        parse_rule: ParseRule::None,
        keywords: &["not sure", "confused", "unclear", "what do you mean", "help me understand"],
    },
    ModeSpec {
        mode: ConversationMode::Generate,
        template: builtin::MODE_GENERATE,
        parse_rule: ParseRule::Ideas,
        keywords: &["generate", "give me", "list", "suggest", "come up with"],
    },
    ModeSpec {
        mode: ConversationMode::Refine,
        template: builtin::MODE_REFINE,
        parse_rule: ParseRule::Ideas,
        keywords: &["refine", "improve", "polish", "tweak", "make it better"],
    },
    ModeSpec {
        mode: ConversationMode::Compare,
        template: builtin::MODE_COMPARE,
        parse_rule: ParseRule::Decisions,
        keywords: &["compare", " vs ", "versus", "which is better", "trade-off", "pros and cons"],
    },
    ModeSpec {
        mode: ConversationMode::Validate,
        template: builtin::MODE_VALIDATE,
        parse_rule: ParseRule::None,
        keywords: &["validate", "risk", "feasible", "will this work", "sanity check"],
    },
    ModeSpec {
        mode: ConversationMode::Plan,
        template: builtin::MODE_PLAN,
        parse_rule: ParseRule::Decisions,
        keywords: &["plan", "roadmap", "next steps", "timeline", "milestone"],
    },
];

/// Look up the spec for a mode
pub fn mode_spec(mode: ConversationMode) -> &'static ModeSpec {
    // MODE_TABLE is ordered like ConversationMode::ALL
    let index = ConversationMode::ALL
        .iter()
        .position(|m| *m == mode)
        .unwrap_or(0);
    &MODE_TABLE[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_all_modes() {
        for (spec, mode) in MODE_TABLE.iter().zip(ConversationMode::ALL) {
            assert_eq!(spec.mode, mode);
            assert_eq!(mode_spec(mode).mode, mode);
        }
    }

    #[test]
    fn test_every_mode_template_is_builtin() {
        for spec in &MODE_TABLE {
            assert!(
                builtin::get_builtin_template(spec.template).is_some(),
                "missing template for {}",
                spec.mode
            );
        }
    }

    #[test]
    fn test_item_types_follow_parse_rules() {
        assert_eq!(
            mode_spec(ConversationMode::Brainstorm).item_type(),
            Some(ItemType::Idea)
        );
        assert_eq!(
            mode_spec(ConversationMode::Plan).item_type(),
            Some(ItemType::Decision)
        );
        assert_eq!(mode_spec(ConversationMode::Validate).item_type(), None);
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for spec in &MODE_TABLE {
            for keyword in spec.keywords {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }
}
