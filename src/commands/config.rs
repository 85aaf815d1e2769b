// Configuration commands

use crate::config::ScoringConfig;

/// Active scoring configuration (already validated at startup)
pub fn get_config(config: &ScoringConfig) -> ScoringConfig {
    config.clone()
}
