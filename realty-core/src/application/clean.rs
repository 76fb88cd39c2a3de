// realty-core/src/application/clean.rs

use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;

use crate::error::RealtyError;
use crate::infrastructure::config::load_project_config;

/// Remove the project's target directory. Returns the path when something was deleted.
pub fn clean_project(project_dir: &Path) -> Result<Option<PathBuf>, RealtyError> {
    info!("🧹 Initializing realty cleanup sequence...");

    let config = load_project_config(project_dir)?;
    let target_rel_path = &config.target_path;

    // Path traversal guard: the target must stay inside the project
    let escapes = Path::new(target_rel_path)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes || target_rel_path.trim().is_empty() {
        return Err(RealtyError::UnsafePath(target_rel_path.clone()));
    }

    let full_path = project_dir.join(target_rel_path);
    if !full_path.exists() {
        return Ok(None);
    }
    if full_path.is_dir() {
        fs::remove_dir_all(&full_path)?;
    } else {
        fs::remove_file(&full_path)?;
    }
    info!(path = %full_path.display(), "Artifact removed");
    Ok(Some(full_path))
}
