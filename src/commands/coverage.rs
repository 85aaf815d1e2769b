// Coverage assessment commands

use crate::config::ScoringConfig;
use crate::scoring::{self, CoverageInput, CoverageReport};

/// Score research coverage with the configured weights
pub fn assess_coverage(config: &ScoringConfig, input: CoverageInput) -> CoverageReport {
    let report = scoring::assess_coverage(&input, config);
    log::debug!(
        "Coverage score {} (ratio {:.2}, penalty {}, sufficient {})",
        report.score,
        report.ratio,
        report.penalty,
        report.sufficient
    );
    report
}
