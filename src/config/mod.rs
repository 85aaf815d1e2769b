// Scoring and conversation configuration

pub mod loader;

pub use loader::{ConfigLoader, ScoringConfig};

use std::path::Path;
use std::sync::Arc;

/// Load the scoring config once at startup and share it.
/// An explicit path takes precedence over the global config file.
pub fn load_shared_config(explicit_path: Option<&Path>) -> Arc<ScoringConfig> {
    let loader = match explicit_path {
        Some(path) => ConfigLoader::new().with_path(path),
        None => ConfigLoader::new(),
    };
    Arc::new(loader.load())
}
