//! Project operations for file storage
//!
//! Projects are stored in `{data_dir}/projects/{id}.json`. Every
//! read-modify-write runs under an exclusive `fs2` lock on
//! `{id}.lock`, so overlapping requests for one project are serialised.

use super::{ensure_dir, get_projects_dir, read_json, write_json, FileResult};
use crate::models::{ChatMessage, Item, ItemType, Project};
use fs2::FileExt;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Project ids become file names, so only a safe character set is accepted
fn validate_project_id(project_id: &str) -> FileResult<()> {
    let valid = !project_id.is_empty()
        && project_id.len() <= 64
        && project_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(format!("Invalid project id: '{}'", project_id))
    }
}

fn project_file_path(data_dir: &Path, project_id: &str) -> PathBuf {
    get_projects_dir(data_dir).join(format!("{}.json", project_id))
}

fn lock_file_path(data_dir: &Path, project_id: &str) -> PathBuf {
    get_projects_dir(data_dir).join(format!("{}.lock", project_id))
}

/// Exclusive project lock, released on drop
struct ProjectLock {
    file: File,
}

impl ProjectLock {
    fn acquire(data_dir: &Path, project_id: &str) -> FileResult<Self> {
        ensure_dir(&get_projects_dir(data_dir))?;
        let path = lock_file_path(data_dir, project_id);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| format!("Failed to open lock file {:?}: {}", path, e))?;
        file.lock_exclusive()
            .map_err(|e| format!("Failed to lock project {}: {}", project_id, e))?;
        Ok(Self { file })
    }
}

impl Drop for ProjectLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            log::warn!("Failed to release project lock: {}", e);
        }
    }
}

fn save_project(data_dir: &Path, project: &Project) -> FileResult<()> {
    write_json(&project_file_path(data_dir, &project.id), project)
}

/// Load a project, apply `update`, and save it, all under the project lock
fn update_project<T>(
    data_dir: &Path,
    project_id: &str,
    update: impl FnOnce(&mut Project) -> T,
) -> FileResult<T> {
    validate_project_id(project_id)?;
    let _lock = ProjectLock::acquire(data_dir, project_id)?;

    let mut project = get_project(data_dir, project_id)?;
    let result = update(&mut project);
    project.updated_at = chrono::Utc::now().to_rfc3339();
    save_project(data_dir, &project)?;
    Ok(result)
}

/// Create and persist a new project
pub fn create_project(data_dir: &Path, title: &str) -> FileResult<Project> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Project title cannot be empty".to_string());
    }

    let project = Project::new(title);
    let _lock = ProjectLock::acquire(data_dir, &project.id)?;
    save_project(data_dir, &project)?;

    log::info!("Created project {} ('{}')", project.id, project.title);
    Ok(project)
}

/// Check if a project file exists
pub fn project_exists(data_dir: &Path, project_id: &str) -> bool {
    validate_project_id(project_id).is_ok() && project_file_path(data_dir, project_id).exists()
}

pub fn get_project(data_dir: &Path, project_id: &str) -> FileResult<Project> {
    validate_project_id(project_id)?;
    let path = project_file_path(data_dir, project_id);
    if !path.exists() {
        return Err(format!("Project not found: {}", project_id));
    }
    read_json(&path)
}

/// List all projects, most recently updated first.
/// Unreadable files are skipped with a warning.
pub fn list_projects(data_dir: &Path) -> FileResult<Vec<Project>> {
    let dir = get_projects_dir(data_dir);
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries =
        fs::read_dir(&dir).map_err(|e| format!("Failed to read directory {:?}: {}", dir, e))?;

    let mut projects = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }
        match read_json::<Project>(&path) {
            Ok(project) => projects.push(project),
            Err(e) => log::warn!("Skipping unreadable project file: {}", e),
        }
    }

    projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(projects)
}

/// Delete a project and its lock file
pub fn delete_project(data_dir: &Path, project_id: &str) -> FileResult<()> {
    validate_project_id(project_id)?;
    {
        let _lock = ProjectLock::acquire(data_dir, project_id)?;
        let path = project_file_path(data_dir, project_id);
        if !path.exists() {
            return Err(format!("Project not found: {}", project_id));
        }
        fs::remove_file(&path)
            .map_err(|e| format!("Failed to delete project file {:?}: {}", path, e))?;
    }

    let lock_path = lock_file_path(data_dir, project_id);
    if let Err(e) = fs::remove_file(&lock_path) {
        log::debug!("Could not remove lock file {:?}: {}", lock_path, e);
    }

    log::info!("Deleted project {}", project_id);
    Ok(())
}

/// Append messages in order
pub fn append_messages(
    data_dir: &Path,
    project_id: &str,
    messages: &[ChatMessage],
) -> FileResult<()> {
    update_project(data_dir, project_id, |project| {
        project.messages.extend_from_slice(messages);
    })
}

/// Add items not already stored.
///
/// Items are keyed by normalized text plus type. When a key exists the
/// stored item is kept untouched, so repeated calls are idempotent. Items
/// with blank text are ignored. Returns only the items that were stored.
pub fn upsert_items(data_dir: &Path, project_id: &str, items: &[Item]) -> FileResult<Vec<Item>> {
    update_project(data_dir, project_id, |project| merge_items(project, items))
}

/// Persist one conversation turn: messages and new items in a single write
pub fn record_exchange(
    data_dir: &Path,
    project_id: &str,
    messages: &[ChatMessage],
    items: &[Item],
) -> FileResult<Vec<Item>> {
    update_project(data_dir, project_id, |project| {
        project.messages.extend_from_slice(messages);
        merge_items(project, items)
    })
}

fn merge_items(project: &mut Project, items: &[Item]) -> Vec<Item> {
    let mut seen: HashSet<(String, ItemType)> = project
        .items
        .iter()
        .map(|item| (item.normalized_text(), item.item_type))
        .collect();

    let mut stored = Vec::new();
    for item in items {
        let key = (item.normalized_text(), item.item_type);
        if key.0.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.insert(key);
        project.items.push(item.clone());
        stored.push(item.clone());
    }

    if stored.len() < items.len() {
        log::debug!(
            "Skipped {} duplicate item(s) for project {}",
            items.len() - stored.len(),
            project.id
        );
    }
    stored
}
