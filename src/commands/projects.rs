// Project management commands

use crate::file_storage::project_ops;
use crate::models::{Item, ItemType, Project};
use std::path::Path;
use std::str::FromStr;

use super::types::{CreateProjectRequest, ProjectSummary};

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            title: project.title.clone(),
            idea_count: project.items_of_type(ItemType::Idea).count(),
            decision_count: project.items_of_type(ItemType::Decision).count(),
            message_count: project.messages.len(),
            created_at: project.created_at.clone(),
            updated_at: project.updated_at.clone(),
        }
    }
}

pub fn create_project(data_dir: &Path, request: CreateProjectRequest) -> Result<Project, String> {
    project_ops::create_project(data_dir, &request.title)
}

pub fn get_project(data_dir: &Path, project_id: &str) -> Result<Project, String> {
    project_ops::get_project(data_dir, project_id)
}

/// List projects, most recently updated first
pub fn list_projects(data_dir: &Path) -> Result<Vec<ProjectSummary>, String> {
    let projects = project_ops::list_projects(data_dir)?;
    Ok(projects.iter().map(ProjectSummary::from).collect())
}

pub fn delete_project(data_dir: &Path, project_id: &str) -> Result<(), String> {
    project_ops::delete_project(data_dir, project_id)
}

/// List a project's items, optionally filtered by type ("idea"/"decision")
pub fn list_items(
    data_dir: &Path,
    project_id: &str,
    item_type: Option<&str>,
) -> Result<Vec<Item>, String> {
    let filter = item_type.map(ItemType::from_str).transpose()?;
    let project = project_ops::get_project(data_dir, project_id)?;

    Ok(project
        .items
        .into_iter()
        .filter(|item| filter.map_or(true, |t| item.item_type == t))
        .collect())
}
