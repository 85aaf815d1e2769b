//! Configuration command routing
//!
//! Handles: get_config, list_modes, assess_coverage

use crate::commands;
use crate::scoring::CoverageInput;
use serde_json::Value;

use super::{get_arg, ServerAppState};

/// Route configuration and misc commands
pub async fn route_config_command(
    cmd: &str,
    args: Value,
    state: &ServerAppState,
) -> Result<Value, String> {
    let value = match cmd {
        "get_config" => serde_json::to_value(commands::get_config(&state.config)),

        "list_modes" => serde_json::to_value(commands::list_modes()),

        "assess_coverage" => {
            let input: CoverageInput = get_arg(&args, "input")?;
            serde_json::to_value(commands::assess_coverage(&state.config, input))
        }

        _ => return Err(format!("Unknown config command: {}", cmd)),
    };
    value.map_err(|e| e.to_string())
}

/// Check if a command is a config command
pub fn is_config_command(cmd: &str) -> bool {
    matches!(cmd, "get_config" | "list_modes" | "assess_coverage")
}
