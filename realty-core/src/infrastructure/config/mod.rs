pub mod project;

pub use project::{ProjectConfig, SourcePaths, load_project_config};
