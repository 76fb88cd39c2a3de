// realty-core/src/ports/connector.rs

// What the pipeline needs from a SQL engine, without knowing which one runs it.

use std::fmt;
use std::path::Path;

use crate::domain::table::Table;
use crate::error::RealtyError;

/// One column of a relation, independent of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
}

/// How a stage result is kept in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialization {
    View,
    Table,
}

impl fmt::Display for Materialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Materialization::View => f.write_str("view"),
            Materialization::Table => f.write_str("table"),
        }
    }
}

pub trait Connector: Send + Sync {
    fn execute(&self, query: &str) -> Result<(), RealtyError>;

    fn fetch_columns(&self, relation: &str) -> Result<Vec<ColumnSchema>, RealtyError>;

    /// Load at most `limit` rows of the CSV at `path`, in file order, as table `name`.
    fn register_source(&self, name: &str, path: &Path, limit: usize) -> Result<(), RealtyError>;

    /// `CREATE OR REPLACE <kind> name AS sql`
    fn materialize(
        &self,
        name: &str,
        sql: &str,
        kind: Materialization,
    ) -> Result<(), RealtyError>;

    fn query_scalar(&self, query: &str) -> Result<u64, RealtyError>;

    /// Run `query` and read its result into a [`Table`].
    fn query_table(&self, query: &str) -> Result<Table, RealtyError>;

    fn engine_name(&self) -> &str;
}
