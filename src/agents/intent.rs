// Intent classification - point-based keyword scoring that picks a conversation mode

use super::modes::MODE_TABLE;
use crate::config::ScoringConfig;
use crate::models::ConversationMode;
use serde::{Deserialize, Serialize};

/// Points awarded per keyword hit
pub const KEYWORD_POINTS: i32 = 3;

/// Messages with fewer words than this take the short-message penalty
pub const SHORT_MESSAGE_WORDS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentClassification {
    pub mode: ConversationMode,
    /// Winning score (may be below the threshold when `fallback` is set)
    pub score: i32,
    /// True when no mode reached the threshold and the default was used
    pub fallback: bool,
}

/// Lowercase, replace punctuation with spaces, and pad with spaces so that
/// `contains(" word ")` only matches whole words.
fn normalize_for_matching(text: &str) -> String {
    let words: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect();
    format!(" {} ", words.join(" "))
}

/// Score every mode for a message, in `ConversationMode::ALL` order
pub fn score_modes(message: &str, config: &ScoringConfig) -> Vec<(ConversationMode, i32)> {
    let normalized = normalize_for_matching(message);
    let word_count = normalized.split_whitespace().count();
    let is_short = word_count < SHORT_MESSAGE_WORDS;
    let has_question = message.contains('?');

    MODE_TABLE
        .iter()
        .map(|spec| {
            let hits = spec
                .keywords
                .iter()
                .filter(|keyword| normalized.contains(&normalize_for_matching(keyword)))
                .count() as i32;
            let mut score = hits * KEYWORD_POINTS;

            if spec.mode == ConversationMode::Clarify {
                if has_question {
                    score += config.question_bonus as i32;
                }
            } else if is_short && score > 0 {
                score -= config.short_message_penalty as i32;
            }

            (spec.mode, score)
        })
        .collect()
}

/// Pick the mode for a message.
///
/// The highest score at or above `intent_min_score` wins, with ties broken
/// by table order. Otherwise the default mode is used.
pub fn classify_intent(message: &str, config: &ScoringConfig) -> IntentClassification {
    let scores = score_modes(message, config);

    let mut best: Option<(ConversationMode, i32)> = None;
    for (mode, score) in scores {
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((mode, score));
        }
    }

    let (mode, score) = best.unwrap_or((ConversationMode::default(), 0));
    if score >= config.intent_min_score as i32 {
        IntentClassification {
            mode,
            score,
            fallback: false,
        }
    } else {
        log::debug!(
            "Intent score {} for {} below threshold {}, using default mode",
            score,
            mode,
            config.intent_min_score
        );
        IntentClassification {
            mode: ConversationMode::default(),
            score,
            fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn test_plan_keywords_select_plan() {
        let result = classify_intent("Can we put together a roadmap with next steps", &config());
        assert_eq!(result.mode, ConversationMode::Plan);
        assert_eq!(result.score, 2 * KEYWORD_POINTS);
        assert!(!result.fallback);
    }

    #[test]
    fn test_question_boosts_compare_over_clarify() {
        let result = classify_intent("Which is better for us, Postgres versus SQLite?", &config());
        assert_eq!(result.mode, ConversationMode::Compare);
    }

    #[test]
    fn test_bare_question_selects_clarify() {
        let result = classify_intent("Hmm, where should this even start?", &config());
        assert_eq!(result.mode, ConversationMode::Clarify);
        assert_eq!(result.score, 2);
    }

    #[test]
    fn test_no_signal_falls_back_to_brainstorm() {
        let result = classify_intent("A recipe sharing app for students", &config());
        assert_eq!(result.mode, ConversationMode::Brainstorm);
        assert!(result.fallback);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_keywords_match_whole_words_only() {
        // "explanation" contains "plan" as a substring
        let scores = score_modes("I need an explanation of the market", &config());
        let plan = scores
            .iter()
            .find(|(m, _)| *m == ConversationMode::Plan)
            .unwrap();
        assert_eq!(plan.1, 0);
    }

    #[test]
    fn test_short_message_penalty_applies() {
        let scores = score_modes("refine this", &config());
        let refine = scores
            .iter()
            .find(|(m, _)| *m == ConversationMode::Refine)
            .unwrap();
        assert_eq!(refine.1, KEYWORD_POINTS - 1);
    }

    #[test]
    fn test_threshold_from_config() {
        let strict = ScoringConfig {
            intent_min_score: 10,
            ..ScoringConfig::default()
        };
        let result = classify_intent("Please refine and polish the idea list", &strict);
        assert!(result.fallback);
        assert_eq!(result.mode, ConversationMode::Brainstorm);
    }

    #[test]
    fn test_ties_break_by_table_order() {
        // "ideas" (brainstorm) and "list" (generate) score the same
        let result = classify_intent("Please list more ideas for the launch", &config());
        assert_eq!(result.mode, ConversationMode::Brainstorm);
        assert!(!result.fallback);
    }

    #[test]
    fn test_normalize_for_matching() {
        assert_eq!(normalize_for_matching("A vs. B!"), " a vs b ");
        assert_eq!(normalize_for_matching(""), "  ");
    }
}
