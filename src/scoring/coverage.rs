//! Coverage/threshold scorer
//!
//! Scores how well a project's research covers its open questions:
//! `min(base weight, ratio × 100) + quality bonus − penalties`, clamped to
//! `[0, 100]`. All functions are pure and total.

use crate::config::ScoringConfig;
use serde::{Deserialize, Serialize};

/// Upper bound of every score
pub const MAX_SCORE: i64 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageInput {
    #[serde(default)]
    pub high_priority_gaps: u32,
    #[serde(default)]
    pub medium_priority_gaps: u32,
    #[serde(default)]
    pub research_items: u32,
    #[serde(default)]
    pub total_items: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub score: u8,
    pub ratio: f64,
    pub bonus_applied: bool,
    /// Total penalty subtracted before clamping
    pub penalty: u32,
    /// Score reached `sufficient_score_threshold`
    pub sufficient: bool,
}

/// research / total, or 0 when there is nothing to cover
pub fn coverage_ratio(input: &CoverageInput) -> f64 {
    if input.total_items == 0 {
        return 0.0;
    }
    (input.research_items as f64 / input.total_items as f64).clamp(0.0, 1.0)
}

fn gap_penalty(high: u32, medium: u32, weights: &ScoringConfig) -> i64 {
    let high = (high as i64).saturating_mul(weights.high_priority_penalty as i64);
    let medium = (medium as i64).saturating_mul(weights.medium_priority_penalty as i64);
    high.saturating_add(medium)
}

fn clamp_score(raw: i64) -> u8 {
    raw.clamp(0, MAX_SCORE) as u8
}

fn bonus_applies(input: &CoverageInput, ratio: f64, weights: &ScoringConfig) -> bool {
    input.high_priority_gaps == 0 && ratio >= weights.quality_bonus_min_ratio
}

/// Score with an explicit base contribution and no bonus
pub fn score_with_base(base: u32, high: u32, medium: u32, weights: &ScoringConfig) -> u8 {
    clamp_score((base as i64).saturating_sub(gap_penalty(high, medium, weights)))
}

/// Coverage score in `[0, 100]`
pub fn coverage_score(input: &CoverageInput, weights: &ScoringConfig) -> u8 {
    assess_coverage(input, weights).score
}

pub fn assess_coverage(input: &CoverageInput, weights: &ScoringConfig) -> CoverageReport {
    let ratio = coverage_ratio(input);
    let ratio_component = (ratio * 100.0).round() as i64;
    let base = ratio_component.min(weights.base_score_weight as i64);

    let bonus_applied = bonus_applies(input, ratio, weights);
    let bonus = if bonus_applied {
        weights.quality_bonus as i64
    } else {
        0
    };

    let penalty = gap_penalty(input.high_priority_gaps, input.medium_priority_gaps, weights);
    let score = clamp_score(base.saturating_add(bonus).saturating_sub(penalty));

    CoverageReport {
        score,
        ratio,
        bonus_applied,
        penalty: penalty.min(u32::MAX as i64) as u32,
        sufficient: score as u32 >= weights.sufficient_score_threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> ScoringConfig {
        ScoringConfig::default()
    }

    fn input(high: u32, medium: u32, research: u32, total: u32) -> CoverageInput {
        CoverageInput {
            high_priority_gaps: high,
            medium_priority_gaps: medium,
            research_items: research,
            total_items: total,
        }
    }

    #[test]
    fn test_base_forty_with_two_high_one_medium() {
        assert_eq!(score_with_base(40, 2, 1, &weights()), 5);
    }

    #[test]
    fn test_full_coverage_hits_base_cap_plus_bonus() {
        let report = assess_coverage(&input(0, 0, 10, 10), &weights());
        assert_eq!(report.score, 80);
        assert!(report.bonus_applied);
        assert!(report.sufficient);
        assert_eq!(report.penalty, 0);
    }

    #[test]
    fn test_ratio_component_below_cap() {
        // 5/10 -> 50, below the bonus ratio of 0.6
        let report = assess_coverage(&input(0, 0, 5, 10), &weights());
        assert_eq!(report.score, 50);
        assert!(!report.bonus_applied);
        assert!(!report.sufficient);
    }

    #[test]
    fn test_high_gap_blocks_bonus() {
        let report = assess_coverage(&input(1, 0, 10, 10), &weights());
        assert!(!report.bonus_applied);
        assert_eq!(report.score, 70 - 15);
    }

    #[test]
    fn test_empty_project_scores_zero() {
        let report = assess_coverage(&CoverageInput::default(), &weights());
        assert_eq!(report.ratio, 0.0);
        assert_eq!(report.score, 0);
    }

    #[test]
    fn test_score_clamped_to_range() {
        assert_eq!(score_with_base(10, 5, 5, &weights()), 0);
        assert_eq!(score_with_base(500, 0, 0, &weights()), 100);
        let generous = ScoringConfig {
            base_score_weight: 100,
            quality_bonus: 30,
            ..ScoringConfig::default()
        };
        assert_eq!(coverage_score(&input(0, 0, 4, 4), &generous), 100);
    }

    #[test]
    fn test_research_beyond_total_caps_ratio() {
        assert_eq!(coverage_ratio(&input(0, 0, 12, 10)), 1.0);
    }

    #[test]
    fn test_score_non_increasing_in_gaps() {
        let w = weights();
        for research in [0, 3, 6, 10] {
            let mut previous = u8::MAX;
            for high in 0..5 {
                let score = coverage_score(&input(high, 0, research, 10), &w);
                assert!(score <= previous);
                previous = score;
            }
            let mut previous = u8::MAX;
            for medium in 0..10 {
                let score = coverage_score(&input(0, medium, research, 10), &w);
                assert!(score <= previous);
                previous = score;
            }
        }
    }

    #[test]
    fn test_custom_penalties_from_config() {
        let lenient = ScoringConfig {
            high_priority_penalty: 0,
            medium_priority_penalty: 0,
            ..ScoringConfig::default()
        };
        assert_eq!(score_with_base(40, 2, 1, &lenient), 40);
    }

    #[test]
    fn test_extreme_penalties_do_not_overflow() {
        let harsh = ScoringConfig {
            high_priority_penalty: u32::MAX,
            medium_priority_penalty: u32::MAX,
            ..ScoringConfig::default()
        };
        let report = assess_coverage(&input(u32::MAX, u32::MAX, 10, 10), &harsh);
        assert_eq!(report.score, 0);
        assert_eq!(report.penalty, u32::MAX);
        assert!(!report.sufficient);
        assert_eq!(score_with_base(u32::MAX, u32::MAX, u32::MAX, &harsh), 0);
    }
}
