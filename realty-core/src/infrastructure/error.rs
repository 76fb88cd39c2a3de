// realty-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(realty::infra::database::duckdb),
        help("A pipeline statement failed in DuckDB. Check that each source is a comma-separated file with a header row.")
    )]
    DuckDB(#[from] duckdb::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(realty::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    #[error("Source file for '{frame}' not found at '{path}'")]
    #[diagnostic(
        code(realty::infra::source_missing),
        help("Source paths in realty.yaml are resolved against the project directory.")
    )]
    SourceNotFound { frame: String, path: String },

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(realty::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(realty::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Project configuration not found at '{0}'")]
    #[diagnostic(code(realty::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Invalid project configuration: {0}")]
    #[diagnostic(
        code(realty::infra::config_invalid),
        help("`name` must be non-empty and `row-limit` at least 1.")
    )]
    Validation(#[from] validator::ValidationErrors),
}

// Shortcut for `?` on duckdb calls
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}
