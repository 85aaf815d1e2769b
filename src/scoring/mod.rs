// Coverage scoring for accumulated research

pub mod coverage;

pub use coverage::{
    assess_coverage, coverage_ratio, coverage_score, score_with_base, CoverageInput,
    CoverageReport,
};
