//! Command routing modules
//!
//! Command routing is split into focused sub-modules by domain:
//! - project_routes: Project and item management commands
//! - chat_routes: Conversation turn and intent commands
//! - config_routes: Configuration, mode listing, and coverage commands

pub mod chat_routes;
pub mod config_routes;
pub mod project_routes;

use serde_json::Value;

use super::ServerAppState;

// =============================================================================
// Argument Helpers
// =============================================================================

/// Extract a required argument from JSON args
pub fn get_arg<T: serde::de::DeserializeOwned>(args: &Value, name: &str) -> Result<T, String> {
    serde_json::from_value(
        args.get(name)
            .ok_or_else(|| format!("Missing argument: {}", name))?
            .clone(),
    )
    .map_err(|e| format!("Invalid argument {}: {}", name, e))
}

/// Extract an optional argument from JSON args
pub fn get_opt_arg<T: serde::de::DeserializeOwned>(
    args: &Value,
    name: &str,
) -> Result<Option<T>, String> {
    match args.get(name) {
        Some(v) if !v.is_null() => serde_json::from_value(v.clone())
            .map(Some)
            .map_err(|e| format!("Invalid argument {}: {}", name, e)),
        _ => Ok(None),
    }
}

// =============================================================================
// Command Routing Macros
// =============================================================================

/// Routes a simple async command: awaits the handler, serializes result
#[macro_export]
macro_rules! route_async {
    ($handler:expr) => {{
        let result = $handler.await?;
        serde_json::to_value(result).map_err(|e| e.to_string())
    }};
}

/// Routes a sync command
#[macro_export]
macro_rules! route_sync {
    ($handler:expr) => {{
        let result = $handler?;
        serde_json::to_value(result).map_err(|e| e.to_string())
    }};
}

/// Routes a command that returns ()
#[macro_export]
macro_rules! route_unit {
    ($handler:expr) => {{
        $handler?;
        Ok(serde_json::Value::Null)
    }};
}

// Re-export macros for use in route modules
pub use route_async;
pub use route_sync;
pub use route_unit;

// =============================================================================
// Main Command Dispatcher
// =============================================================================

/// Route a command to its implementation by dispatching to the appropriate sub-router
pub async fn route_command(
    cmd: &str,
    args: Value,
    state: &ServerAppState,
) -> Result<Value, String> {
    if project_routes::is_project_command(cmd) {
        return project_routes::route_project_command(cmd, args, state).await;
    }

    if chat_routes::is_chat_command(cmd) {
        return chat_routes::route_chat_command(cmd, args, state).await;
    }

    if config_routes::is_config_command(cmd) {
        return config_routes::route_config_command(cmd, args, state).await;
    }

    Err(format!("Unknown command: {}", cmd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_arg_success() {
        let args = serde_json::json!({"title": "test", "count": 42});
        let title: String = get_arg(&args, "title").unwrap();
        let count: i32 = get_arg(&args, "count").unwrap();
        assert_eq!(title, "test");
        assert_eq!(count, 42);
    }

    #[test]
    fn test_get_arg_missing() {
        let args = serde_json::json!({"title": "test"});
        let result: Result<i32, String> = get_arg(&args, "missing");
        assert!(result.unwrap_err().contains("Missing argument"));
    }

    #[test]
    fn test_get_arg_wrong_type() {
        let args = serde_json::json!({"count": "many"});
        let result: Result<i32, String> = get_arg(&args, "count");
        assert!(result.unwrap_err().contains("Invalid argument count"));
    }

    #[test]
    fn test_get_opt_arg() {
        let args = serde_json::json!({"title": "test", "nothing": null});
        let title: Option<String> = get_opt_arg(&args, "title").unwrap();
        let missing: Option<String> = get_opt_arg(&args, "missing").unwrap();
        let null: Option<String> = get_opt_arg(&args, "nothing").unwrap();
        assert_eq!(title, Some("test".to_string()));
        assert_eq!(missing, None);
        assert_eq!(null, None);
    }

    #[test]
    fn test_command_sets_are_disjoint() {
        let commands = [
            "create_project",
            "get_project",
            "list_projects",
            "delete_project",
            "list_items",
            "send_message",
            "classify_message",
            "get_config",
            "list_modes",
            "assess_coverage",
        ];
        for cmd in commands {
            let owners = [
                project_routes::is_project_command(cmd),
                chat_routes::is_chat_command(cmd),
                config_routes::is_config_command(cmd),
            ]
            .iter()
            .filter(|owned| **owned)
            .count();
            assert_eq!(owners, 1, "{} should have exactly one router", cmd);
        }
    }
}
