// realty-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum RealtyError {
    // --- DOMAIN ERRORS (schema contract, coercion) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, parsing, DuckDB) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- GENERIC / APPLICATION ERRORS ---
    #[error("Internal Error: {0}")]
    InternalError(String),

    #[error("Unsafe path traversal detected: {0}")]
    #[diagnostic(
        code(realty::unsafe_path),
        help("`target-path` must be a relative path inside the project directory.")
    )]
    UnsafePath(String),
}

impl From<std::io::Error> for RealtyError {
    fn from(err: std::io::Error) -> Self {
        RealtyError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for RealtyError {
    fn from(err: duckdb::Error) -> Self {
        RealtyError::Infrastructure(InfrastructureError::from(err))
    }
}
