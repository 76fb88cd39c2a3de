// realty-core/src/infrastructure/config/project.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::domain::source::Frame;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["realty_project.yaml", "realty.yaml"];
pub const DEFAULT_ROW_LIMIT: usize = 1_000_000;

/// One CSV per market.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SourcePaths {
    pub california: PathBuf,
    pub melbourne: PathBuf,
    pub portugal: PathBuf,
}

impl SourcePaths {
    pub fn get(&self, frame: Frame) -> &Path {
        match frame {
            Frame::California => &self.california,
            Frame::Melbourne => &self.melbourne,
            Frame::Portugal => &self.portugal,
        }
    }

    /// Anchor relative paths at `root`; absolute ones are kept.
    pub fn resolve_against(&self, root: &Path) -> SourcePaths {
        let anchor = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                root.join(p)
            }
        };
        SourcePaths {
            california: anchor(&self.california),
            melbourne: anchor(&self.melbourne),
            portugal: anchor(&self.portugal),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ProjectConfig {
    #[validate(length(min = 1, message = "Project name cannot be empty"))]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    pub sources: SourcePaths,

    #[validate(range(min = 1, message = "row-limit must be at least 1"))]
    #[serde(rename = "row-limit", default = "default_row_limit")]
    pub row_limit: usize,

    #[serde(rename = "target-path", default = "default_target_path")]
    pub target_path: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_row_limit() -> usize {
    DEFAULT_ROW_LIMIT
}
fn default_target_path() -> String {
    "target".to_string()
}

// --- LOADER ---

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Discovery
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project manifest");

    // 2. Base YAML
    let content = fs::read_to_string(&config_path)?;
    let mut config: ProjectConfig = serde_yaml::from_str(&content)?;

    // 3. Layering: REALTY_TARGET_PATH=/tmp/out realty run
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    // 4. Validated after overrides
    config.validate()?;

    config.sources = config.sources.resolve_against(project_dir);
    Ok(config)
}

pub fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CONFIG_CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, CONFIG_CANDIDATES
    )))
}

/// Overrides read through `lookup` so tests never touch the process environment.
pub fn apply_env_overrides(
    config: &mut ProjectConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), InfrastructureError> {
    if let Some(val) = lookup("REALTY_TARGET_PATH") {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
    if let Some(val) = lookup("REALTY_ROW_LIMIT") {
        let limit = val.trim().parse::<usize>().map_err(|_| {
            InfrastructureError::ConfigError(format!(
                "REALTY_ROW_LIMIT must be a positive integer, got '{}'",
                val
            ))
        })?;
        info!(old = config.row_limit, new = limit, "Overriding row limit via ENV");
        config.row_limit = limit;
    }
    if config.row_limit != DEFAULT_ROW_LIMIT {
        warn!(row_limit = config.row_limit, "Non-default row limit in effect");
    }
    Ok(())
}
