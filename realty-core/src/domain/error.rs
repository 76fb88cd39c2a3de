// realty-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, PartialEq)]
pub enum DomainError {
    #[error("Column '{column}' is required by the {stage} stage but is not present")]
    #[diagnostic(
        code(realty::domain::missing_column),
        help("Check that the source CSV headers match the expected schema for each market.")
    )]
    MissingColumn { column: String, stage: String },

    #[error("Cannot coerce value '{value}' in column '{column}' (row {row}) to a number during {stage}")]
    #[diagnostic(
        code(realty::domain::coercion),
        help("Only numbers, booleans and missing cells are accepted in numeric columns.")
    )]
    UncoercibleValue {
        column: String,
        row: usize,
        value: String,
        stage: String,
    },

    #[error("Column length mismatch for '{column}': expected {expected} rows, got {actual}")]
    #[diagnostic(code(realty::domain::shape))]
    ShapeMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown frame '{0}'")]
    #[diagnostic(
        code(realty::domain::frame),
        help("Valid frames are: california, melbourne, portugal.")
    )]
    UnknownFrame(String),

    #[error("Unknown view '{0}'")]
    #[diagnostic(
        code(realty::domain::view),
        help("Valid views are: price_area, elevator_price, parking_price, california_two_bed.")
    )]
    UnknownView(String),
}
