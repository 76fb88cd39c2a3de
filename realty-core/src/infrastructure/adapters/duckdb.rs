// realty-core/src/infrastructure/adapters/duckdb.rs

use duckdb::types::Value as DbValue;
use duckdb::{Config, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument};

// Imports Hexagonaux
use crate::domain::table::{Table, Value};
use crate::error::RealtyError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::{ColumnSchema, Connector, Materialization};

/// In-memory DuckDB running every stage of the pipeline.
///
/// Sources are loaded with `all_varchar = true`, so DuckDB's type sniffing never
/// decides what a cell means; the stages coerce explicitly.
pub struct DuckDBConnector {
    conn: Mutex<Connection>,
}

impl DuckDBConnector {
    pub fn new() -> Result<Self, InfrastructureError> {
        let conn = Connection::open_in_memory_with_flags(Config::default())?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, RealtyError> {
        self.conn.lock().map_err(|_| {
            RealtyError::Infrastructure(InfrastructureError::Io(std::io::Error::other(
                "DuckDB Mutex Poisoned",
            )))
        })
    }
}

fn to_value(cell: DbValue) -> Value {
    match cell {
        DbValue::Null => Value::Missing,
        DbValue::Boolean(b) => Value::Bool(b),
        DbValue::TinyInt(n) => Value::Number(f64::from(n)),
        DbValue::SmallInt(n) => Value::Number(f64::from(n)),
        DbValue::Int(n) => Value::Number(f64::from(n)),
        DbValue::BigInt(n) => Value::Number(n as f64),
        DbValue::HugeInt(n) => Value::Number(n as f64),
        DbValue::UTinyInt(n) => Value::Number(f64::from(n)),
        DbValue::USmallInt(n) => Value::Number(f64::from(n)),
        DbValue::UInt(n) => Value::Number(f64::from(n)),
        DbValue::UBigInt(n) => Value::Number(n as f64),
        DbValue::Float(n) => Value::Number(f64::from(n)),
        DbValue::Double(n) => Value::Number(n),
        DbValue::Decimal(d) => Value::parse(Some(&d.to_string())),
        DbValue::Text(s) => Value::parse(Some(&s)),
        other => Value::Text(format!("{other:?}")),
    }
}

impl Connector for DuckDBConnector {
    fn execute(&self, query: &str) -> Result<(), RealtyError> {
        let conn = self.lock()?;
        debug!(query, "Executing");
        conn.execute(query, []).map(|_rows| ())?;
        Ok(())
    }

    fn fetch_columns(&self, relation: &str) -> Result<Vec<ColumnSchema>, RealtyError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "PRAGMA table_info('{}')",
            relation.replace('\'', "''")
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok(ColumnSchema {
                name: row.get("name")?,
                data_type: row.get("type")?,
            })
        })?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row?);
        }
        Ok(columns)
    }

    #[instrument(skip(self), fields(engine = "duckdb"))]
    fn register_source(&self, name: &str, path: &Path, limit: usize) -> Result<(), RealtyError> {
        let escaped = path.to_string_lossy().replace('\'', "''");
        let query = format!(
            "CREATE OR REPLACE TABLE \"{}\" AS SELECT * FROM read_csv('{}', header = true, all_varchar = true, delim = ',') LIMIT {}",
            name, escaped, limit
        );
        self.execute(&query)
    }

    fn materialize(
        &self,
        name: &str,
        sql: &str,
        kind: Materialization,
    ) -> Result<(), RealtyError> {
        let query = match kind {
            Materialization::View => format!("CREATE OR REPLACE VIEW \"{}\" AS {}", name, sql),
            Materialization::Table => format!("CREATE OR REPLACE TABLE \"{}\" AS {}", name, sql),
        };
        self.execute(&query).map_err(|e| {
            RealtyError::InternalError(format!(
                "Relation '{}' failed.\n    🛑 DB Error: {}\n    📄 Query: {}",
                name, e, query
            ))
        })
    }

    fn query_scalar(&self, query: &str) -> Result<u64, RealtyError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(query)?;
        let mut rows = stmt.query([])?;
        let row = rows
            .next()?
            .ok_or_else(|| RealtyError::InternalError("No scalar value returned".into()))?;
        let value: u64 = row.get(0)?;
        Ok(value)
    }

    fn query_table(&self, query: &str) -> Result<Table, RealtyError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(query)?;
        let mut rows = stmt.query([])?;
        let names = rows
            .as_ref()
            .map(|stmt| stmt.column_names())
            .unwrap_or_default();

        let mut columns: Vec<Vec<Value>> = vec![Vec::new(); names.len()];
        while let Some(row) = rows.next()? {
            for (index, column) in columns.iter_mut().enumerate() {
                column.push(to_value(row.get::<_, DbValue>(index)?));
            }
        }
        Ok(Table::from_columns(names.into_iter().zip(columns))?)
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}
