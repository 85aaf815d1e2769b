//! Conversation command routing
//!
//! Handles: send_message, classify_message

use crate::commands;
use serde_json::Value;

use super::{get_arg, route_async, route_sync, ServerAppState};

/// Route conversation commands
pub async fn route_chat_command(
    cmd: &str,
    args: Value,
    state: &ServerAppState,
) -> Result<Value, String> {
    match cmd {
        "send_message" => {
            let request: commands::SendMessageRequest = get_arg(&args, "request")?;
            route_async!(commands::send_message(
                state.data_dir.as_path(),
                &state.dispatcher,
                state.llm.as_ref(),
                request
            ))
        }

        "classify_message" => {
            let content: String = get_arg(&args, "content")?;
            route_sync!(commands::classify_message(&state.dispatcher, &content))
        }

        _ => Err(format!("Unknown chat command: {}", cmd)),
    }
}

/// Check if a command is a conversation command
pub fn is_chat_command(cmd: &str) -> bool {
    matches!(cmd, "send_message" | "classify_message")
}
