// Configuration file loading for scoring weights and conversation thresholds

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

/// Scoring weights, intent thresholds, and LLM limits.
///
/// Read once at startup and shared behind an `Arc`. Every value has a
/// documented range; anything outside it is replaced by its default with a
/// warning, so loading never fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points removed per high-priority gap
    #[serde(
        rename = "highPriorityPenalty",
        alias = "high_priority_penalty",
        default = "default_high_priority_penalty"
    )]
    pub high_priority_penalty: u32,
    /// Points removed per medium-priority gap
    #[serde(
        rename = "mediumPriorityPenalty",
        alias = "medium_priority_penalty",
        default = "default_medium_priority_penalty"
    )]
    pub medium_priority_penalty: u32,
    /// Cap on the research-ratio contribution
    #[serde(
        rename = "baseScoreWeight",
        alias = "base_score_weight",
        default = "default_base_score_weight"
    )]
    pub base_score_weight: u32,
    /// Bonus awarded when coverage has no high-priority gaps
    #[serde(
        rename = "qualityBonus",
        alias = "quality_bonus",
        default = "default_quality_bonus"
    )]
    pub quality_bonus: u32,
    /// Minimum research ratio before the quality bonus applies
    #[serde(
        rename = "qualityBonusMinRatio",
        alias = "quality_bonus_min_ratio",
        default = "default_quality_bonus_min_ratio"
    )]
    pub quality_bonus_min_ratio: f64,
    /// Score at which coverage counts as sufficient
    #[serde(
        rename = "sufficientScoreThreshold",
        alias = "sufficient_score_threshold",
        default = "default_sufficient_score_threshold"
    )]
    pub sufficient_score_threshold: u32,
    /// Minimum intent points needed to leave the default mode
    #[serde(
        rename = "intentMinScore",
        alias = "intent_min_score",
        default = "default_intent_min_score"
    )]
    pub intent_min_score: u32,
    /// Extra clarify points for messages containing a question mark
    #[serde(
        rename = "questionBonus",
        alias = "question_bonus",
        default = "default_question_bonus"
    )]
    pub question_bonus: u32,
    /// Points removed from non-clarify candidates for very short messages
    #[serde(
        rename = "shortMessagePenalty",
        alias = "short_message_penalty",
        default = "default_short_message_penalty"
    )]
    pub short_message_penalty: u32,
    /// Number of prior messages threaded into each LLM call
    #[serde(
        rename = "contextWindow",
        alias = "context_window",
        default = "default_context_window"
    )]
    pub context_window: usize,
    /// Timeout for a single LLM request in milliseconds
    #[serde(
        rename = "llmTimeoutMs",
        alias = "llm_timeout_ms",
        default = "default_llm_timeout_ms"
    )]
    pub llm_timeout_ms: u64,
    /// Token budget for a single completion
    #[serde(rename = "maxTokens", alias = "max_tokens", default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_high_priority_penalty() -> u32 {
    15
}

fn default_medium_priority_penalty() -> u32 {
    5
}

fn default_base_score_weight() -> u32 {
    70
}

fn default_quality_bonus() -> u32 {
    10
}

fn default_quality_bonus_min_ratio() -> f64 {
    0.6
}

fn default_sufficient_score_threshold() -> u32 {
    60
}

fn default_intent_min_score() -> u32 {
    2
}

fn default_question_bonus() -> u32 {
    2
}

fn default_short_message_penalty() -> u32 {
    1
}

fn default_context_window() -> usize {
    10
}

fn default_llm_timeout_ms() -> u64 {
    60_000
}

fn default_max_tokens() -> u32 {
    2048
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            high_priority_penalty: default_high_priority_penalty(),
            medium_priority_penalty: default_medium_priority_penalty(),
            base_score_weight: default_base_score_weight(),
            quality_bonus: default_quality_bonus(),
            quality_bonus_min_ratio: default_quality_bonus_min_ratio(),
            sufficient_score_threshold: default_sufficient_score_threshold(),
            intent_min_score: default_intent_min_score(),
            question_bonus: default_question_bonus(),
            short_message_penalty: default_short_message_penalty(),
            context_window: default_context_window(),
            llm_timeout_ms: default_llm_timeout_ms(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Reset `value` to `default` when it falls outside `[min, max]`.
/// Returns true if the value was replaced.
fn enforce_range<T>(field: &str, value: &mut T, min: T, max: T, default: T) -> bool
where
    T: PartialOrd + Copy + Display,
{
    // NaN fails both comparisons, so check containment rather than exclusion
    if *value >= min && *value <= max {
        return false;
    }
    log::warn!(
        "Config value {}={} is outside [{}, {}], using default {}",
        field,
        value,
        min,
        max,
        default
    );
    *value = default;
    true
}

impl ScoringConfig {
    /// Replace out-of-range values with defaults.
    /// Returns the names of the fields that were reset.
    pub fn validate(&mut self) -> Vec<&'static str> {
        let mut reset = Vec::new();

        if enforce_range(
            "highPriorityPenalty",
            &mut self.high_priority_penalty,
            0,
            50,
            default_high_priority_penalty(),
        ) {
            reset.push("highPriorityPenalty");
        }
        if enforce_range(
            "mediumPriorityPenalty",
            &mut self.medium_priority_penalty,
            0,
            25,
            default_medium_priority_penalty(),
        ) {
            reset.push("mediumPriorityPenalty");
        }
        if enforce_range(
            "baseScoreWeight",
            &mut self.base_score_weight,
            0,
            100,
            default_base_score_weight(),
        ) {
            reset.push("baseScoreWeight");
        }
        if enforce_range(
            "qualityBonus",
            &mut self.quality_bonus,
            0,
            30,
            default_quality_bonus(),
        ) {
            reset.push("qualityBonus");
        }
        if enforce_range(
            "qualityBonusMinRatio",
            &mut self.quality_bonus_min_ratio,
            0.0,
            1.0,
            default_quality_bonus_min_ratio(),
        ) {
            reset.push("qualityBonusMinRatio");
        }
        if enforce_range(
            "sufficientScoreThreshold",
            &mut self.sufficient_score_threshold,
            0,
            100,
            default_sufficient_score_threshold(),
        ) {
            reset.push("sufficientScoreThreshold");
        }
        if enforce_range(
            "intentMinScore",
            &mut self.intent_min_score,
            1,
            10,
            default_intent_min_score(),
        ) {
            reset.push("intentMinScore");
        }
        if enforce_range(
            "questionBonus",
            &mut self.question_bonus,
            0,
            10,
            default_question_bonus(),
        ) {
            reset.push("questionBonus");
        }
        if enforce_range(
            "shortMessagePenalty",
            &mut self.short_message_penalty,
            0,
            10,
            default_short_message_penalty(),
        ) {
            reset.push("shortMessagePenalty");
        }
        if enforce_range(
            "contextWindow",
            &mut self.context_window,
            1,
            50,
            default_context_window(),
        ) {
            reset.push("contextWindow");
        }
        if enforce_range(
            "llmTimeoutMs",
            &mut self.llm_timeout_ms,
            5_000,
            300_000,
            default_llm_timeout_ms(),
        ) {
            reset.push("llmTimeoutMs");
        }
        if enforce_range(
            "maxTokens",
            &mut self.max_tokens,
            256,
            8192,
            default_max_tokens(),
        ) {
            reset.push("maxTokens");
        }

        reset
    }

    /// Return a validated copy
    pub fn validated(mut self) -> Self {
        self.validate();
        self
    }
}

/// Config loader
pub struct ConfigLoader {
    /// Global config path
    global_path: Option<PathBuf>,
    /// Explicit config path (from the command line)
    explicit_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            global_path: Self::get_global_config_path(),
            explicit_path: None,
        }
    }

    /// Use a specific config file instead of the global one
    pub fn with_path(mut self, path: &Path) -> Self {
        self.explicit_path = Some(path.to_path_buf());
        self
    }

    /// Get the global config path
    fn get_global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("brainstorm-server").join("config.toml"))
    }

    /// Path that `load` will read, if any
    pub fn active_path(&self) -> Option<&Path> {
        self.explicit_path
            .as_deref()
            .or(self.global_path.as_deref())
    }

    /// Load config from a specific path, without range validation
    pub fn load_from_path(&self, path: &Path) -> Result<Option<ScoringConfig>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: ScoringConfig = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;

        Ok(Some(config))
    }

    /// Load the active config file.
    ///
    /// Missing or unreadable files fall back to defaults, and out-of-range
    /// values are reset individually. Never fails.
    pub fn load(&self) -> ScoringConfig {
        let Some(path) = self.active_path() else {
            log::info!("No config directory available, using default scoring config");
            return ScoringConfig::default();
        };

        let config = match self.load_from_path(path) {
            Ok(Some(config)) => {
                log::info!("Loaded scoring config from {}", path.display());
                config
            }
            Ok(None) => {
                log::info!(
                    "No config file at {}, using default scoring config",
                    path.display()
                );
                ScoringConfig::default()
            }
            Err(e) => {
                log::warn!("{}; using default scoring config", e);
                ScoringConfig::default()
            }
        };

        config.validated()
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path, config: &ScoringConfig) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    anyhow!(
                        "Failed to create config directory '{}': {}",
                        parent.display(),
                        e
                    )
                })?;
            }
        }

        let contents = toml::to_string_pretty(config)
            .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;

        fs::write(path, contents)
            .map_err(|e| anyhow!("Failed to write config file '{}': {}", path.display(), e))?;

        log::info!("Saved config to: {}", path.display());
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
