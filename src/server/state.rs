//! Server application state shared across handlers

use crate::agents::ModeDispatcher;
use crate::config::ScoringConfig;
use crate::llm::LlmClient;
use crate::shutdown::ShutdownState;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared state for the server. Cloned into every handler, so all fields
/// are cheap handles.
#[derive(Clone)]
pub struct ServerAppState {
    /// Root directory for project files
    pub data_dir: Arc<PathBuf>,

    /// Validated scoring configuration
    pub config: Arc<ScoringConfig>,

    /// Prompt building and reply parsing for every mode
    pub dispatcher: Arc<ModeDispatcher>,

    /// Hosted model used for conversation turns
    pub llm: Arc<dyn LlmClient>,

    /// Shutdown state
    pub shutdown_state: ShutdownState,
}

impl ServerAppState {
    pub fn new(
        data_dir: PathBuf,
        config: Arc<ScoringConfig>,
        llm: Arc<dyn LlmClient>,
        shutdown_state: ShutdownState,
    ) -> anyhow::Result<Self> {
        let dispatcher = ModeDispatcher::new(config.clone())?;
        Ok(Self {
            data_dir: Arc::new(data_dir),
            config,
            dispatcher: Arc::new(dispatcher),
            llm,
            shutdown_state,
        })
    }
}
