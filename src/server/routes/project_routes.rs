//! Project command routing
//!
//! Handles: create_project, get_project, list_projects, delete_project,
//! list_items

use crate::commands;
use serde_json::Value;

use super::{get_arg, get_opt_arg, route_sync, route_unit, ServerAppState};

/// Route project commands
pub async fn route_project_command(
    cmd: &str,
    args: Value,
    state: &ServerAppState,
) -> Result<Value, String> {
    let data_dir = state.data_dir.as_path();

    match cmd {
        "create_project" => {
            let title: String = get_arg(&args, "title")?;
            route_sync!(commands::create_project(
                data_dir,
                commands::CreateProjectRequest { title }
            ))
        }

        "get_project" => {
            let project_id: String = get_arg(&args, "projectId")?;
            route_sync!(commands::get_project(data_dir, &project_id))
        }

        "list_projects" => route_sync!(commands::list_projects(data_dir)),

        "delete_project" => {
            let project_id: String = get_arg(&args, "projectId")?;
            route_unit!(commands::delete_project(data_dir, &project_id))
        }

        "list_items" => {
            let project_id: String = get_arg(&args, "projectId")?;
            let item_type: Option<String> = get_opt_arg(&args, "itemType")?;
            route_sync!(commands::list_items(
                data_dir,
                &project_id,
                item_type.as_deref()
            ))
        }

        _ => Err(format!("Unknown project command: {}", cmd)),
    }
}

/// Check if a command is a project command
pub fn is_project_command(cmd: &str) -> bool {
    matches!(
        cmd,
        "create_project" | "get_project" | "list_projects" | "delete_project" | "list_items"
    )
}
