// Reply parser - splits model output into a visible message and tagged item lists

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const IDEAS_TAG: &str = "ideas";
pub const DECISIONS_TAG: &str = "decisions";

/// Model text split into what the user sees and the items pulled out of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReply {
    /// Reply text with the tagged block removed, trimmed
    pub message: String,
    /// Item texts from the block, markers stripped, in original order
    pub items: Vec<String>,
}

impl ParsedReply {
    fn plain(text: &str) -> Self {
        Self {
            message: text.trim().to_string(),
            items: Vec::new(),
        }
    }
}

/// Which tagged block, if any, a mode's replies are expected to carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseRule {
    Ideas,
    Decisions,
    None,
}

impl ParseRule {
    /// Tag name searched for by this rule
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            ParseRule::Ideas => Some(IDEAS_TAG),
            ParseRule::Decisions => Some(DECISIONS_TAG),
            ParseRule::None => None,
        }
    }

    pub fn apply(&self, text: &str) -> ParsedReply {
        match self {
            ParseRule::Ideas => parse_ideas(text),
            ParseRule::Decisions => parse_decisions(text),
            ParseRule::None => ParsedReply::plain(text),
        }
    }
}

// Compiled regex patterns
static IDEAS_PATTERN: OnceLock<Regex> = OnceLock::new();
static DECISIONS_PATTERN: OnceLock<Regex> = OnceLock::new();
static BULLET_PATTERN: OnceLock<Regex> = OnceLock::new();

fn block_pattern_source(tag: &str) -> String {
    let tag = regex::escape(tag);
    format!(r"<{tag}>([\s\S]*?)</{tag}>")
}

fn get_ideas_pattern() -> &'static Regex {
    IDEAS_PATTERN.get_or_init(|| Regex::new(&block_pattern_source(IDEAS_TAG)).unwrap())
}

fn get_decisions_pattern() -> &'static Regex {
    DECISIONS_PATTERN.get_or_init(|| Regex::new(&block_pattern_source(DECISIONS_TAG)).unwrap())
}

fn get_bullet_pattern() -> &'static Regex {
    // "-", "*", "+", "•", or an ordinal like "1." / "2)"
    BULLET_PATTERN.get_or_init(|| Regex::new(r"^\s*(?:[-*+•]|\d+[.)])\s*").unwrap())
}

/// Extract `<ideas>…</ideas>` items from a reply
pub fn parse_ideas(text: &str) -> ParsedReply {
    parse_with_pattern(text, get_ideas_pattern())
}

/// Extract `<decisions>…</decisions>` items from a reply
pub fn parse_decisions(text: &str) -> ParsedReply {
    parse_with_pattern(text, get_decisions_pattern())
}

/// Extract items from the first `<tag>…</tag>` block.
///
/// Unterminated or malformed tags never match and are treated as absent.
pub fn parse_tagged_block(text: &str, tag: &str) -> ParsedReply {
    match tag {
        IDEAS_TAG => parse_ideas(text),
        DECISIONS_TAG => parse_decisions(text),
        _ => match Regex::new(&block_pattern_source(tag)) {
            Ok(re) => parse_with_pattern(text, &re),
            Err(e) => {
                log::warn!("Cannot build block pattern for tag '{}': {}", tag, e);
                ParsedReply::plain(text)
            }
        },
    }
}

fn parse_with_pattern(text: &str, pattern: &Regex) -> ParsedReply {
    let Some(caps) = pattern.captures(text) else {
        return ParsedReply::plain(text);
    };
    let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
        return ParsedReply::plain(text);
    };

    let items = split_block_lines(inner.as_str());

    let mut message = String::with_capacity(text.len() - whole.len());
    message.push_str(&text[..whole.start()]);
    message.push_str(&text[whole.end()..]);

    ParsedReply {
        message: message.trim().to_string(),
        items,
    }
}

/// Strip bullet markers and drop empty lines
fn split_block_lines(block: &str) -> Vec<String> {
    block
        .lines()
        .map(|line| get_bullet_pattern().replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ideas_example() {
        let parsed = parse_ideas("Great idea!\n<ideas>\n- Add dark mode\n- Export to PDF\n</ideas>");
        assert_eq!(parsed.message, "Great idea!");
        assert_eq!(parsed.items, vec!["Add dark mode", "Export to PDF"]);
    }

    #[test]
    fn test_no_block_returns_trimmed_text() {
        let parsed = parse_ideas("  Just chatting here.\n\n");
        assert_eq!(parsed.message, "Just chatting here.");
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_unterminated_tag_is_treated_as_absent() {
        let text = "Here you go\n<ideas>\n- Half-finished";
        let parsed = parse_ideas(text);
        assert_eq!(parsed.message, text.trim());
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_mismatched_closing_tag_is_treated_as_absent() {
        let parsed = parse_ideas("<ideas>\n- One\n</idea>");
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_only_first_block_is_extracted() {
        let text = "A\n<ideas>\n- One\n</ideas>\nB\n<ideas>\n- Two\n</ideas>";
        let parsed = parse_ideas(text);
        assert_eq!(parsed.items, vec!["One"]);
        assert_eq!(parsed.message, "A\n\nB\n<ideas>\n- Two\n</ideas>");
    }

    #[test]
    fn test_strips_various_bullet_markers() {
        let text = "<ideas>\n* Star\n• Dot\n+ Plus\n1. Numbered\n2) Paren\nBare line\n</ideas>";
        let parsed = parse_ideas(text);
        assert_eq!(
            parsed.items,
            vec!["Star", "Dot", "Plus", "Numbered", "Paren", "Bare line"]
        );
        assert_eq!(parsed.message, "");
    }

    #[test]
    fn test_discards_empty_and_marker_only_lines() {
        let parsed = parse_ideas("<ideas>\n\n-   \n   - Keep me  \n\n</ideas>");
        assert_eq!(parsed.items, vec!["Keep me"]);
    }

    #[test]
    fn test_inline_hyphen_is_preserved() {
        let parsed = parse_ideas("<ideas>\n- Self-hosted sync\n</ideas>");
        assert_eq!(parsed.items, vec!["Self-hosted sync"]);
    }

    #[test]
    fn test_block_in_the_middle_keeps_surrounding_text() {
        let parsed = parse_ideas("Before\n<ideas>- Inline</ideas>\nAfter");
        assert_eq!(parsed.items, vec!["Inline"]);
        assert_eq!(parsed.message, "Before\n\nAfter");
    }

    #[test]
    fn test_parse_decisions_ignores_ideas_block() {
        let text = "Summary\n<ideas>\n- Idea\n</ideas>\n<decisions>\n- Use Postgres\n</decisions>";
        let parsed = parse_decisions(text);
        assert_eq!(parsed.items, vec!["Use Postgres"]);
        assert!(parsed.message.contains("<ideas>"));
    }

    #[test]
    fn test_parse_tagged_block_custom_tag() {
        let parsed = parse_tagged_block("Risks:\n<risks>\n- Churn\n</risks>", "risks");
        assert_eq!(parsed.items, vec!["Churn"]);
        assert_eq!(parsed.message, "Risks:");
    }

    #[test]
    fn test_parse_rule_none_keeps_tags() {
        let text = "<ideas>\n- Kept\n</ideas>";
        let parsed = ParseRule::None.apply(text);
        assert_eq!(parsed.message, text);
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_parse_rule_tags() {
        assert_eq!(ParseRule::Ideas.tag(), Some("ideas"));
        assert_eq!(ParseRule::Decisions.tag(), Some("decisions"));
        assert_eq!(ParseRule::None.tag(), None);
    }
}
