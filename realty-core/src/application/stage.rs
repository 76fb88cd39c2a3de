// realty-core/src/application/stage.rs

use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::sql::{ROW_COLUMN, count_rows, ident, not_numeric, projection, unless};
use crate::domain::table::Table;
use crate::error::RealtyError;
use crate::ports::connector::{Connector, Materialization};

/// Column names of `relation`, in order.
pub fn column_names(connector: &dyn Connector, relation: &str) -> Result<Vec<String>, RealtyError> {
    Ok(connector
        .fetch_columns(relation)?
        .into_iter()
        .map(|c| c.name)
        .collect())
}

pub fn row_count(connector: &dyn Connector, relation: &str) -> Result<usize, RealtyError> {
    Ok(connector.query_scalar(&count_rows(relation, None))? as usize)
}

/// Snapshot of `relation` in row order, without the row ordinal.
pub fn read_relation(connector: &dyn Connector, relation: &str) -> Result<Table, RealtyError> {
    let columns = column_names(connector, relation)?;
    let select = projection(&columns, &[], &[ROW_COLUMN]);
    if select.is_empty() {
        return Ok(Table::new());
    }
    let order = if columns.iter().any(|c| c == ROW_COLUMN) {
        format!(" ORDER BY {}", ident(ROW_COLUMN))
    } else {
        String::new()
    };
    connector.query_table(&format!("SELECT {} FROM {}{}", select, ident(relation), order))
}

/// Final relation of a stage.
#[derive(Debug, Clone)]
pub struct StageResult {
    pub relation: String,
    pub rows: usize,
    pub columns: Vec<String>,
}

/// Runs a stage as a chain of materialized tables, one per rule.
///
/// Each step reads the previous one and keeps `_row` order. Intermediate
/// tables are dropped once the next step exists; the starting relation is
/// never touched.
pub struct StageRunner<'a> {
    connector: &'a dyn Connector,
    stage: &'static str,
    relation: String,
    columns: Vec<String>,
    rows: usize,
    steps: usize,
}

impl<'a> StageRunner<'a> {
    pub fn start(
        connector: &'a dyn Connector,
        stage: &'static str,
        relation: &str,
    ) -> Result<Self, RealtyError> {
        Ok(Self {
            connector,
            stage,
            relation: relation.to_string(),
            columns: column_names(connector, relation)?,
            rows: row_count(connector, relation)?,
            steps: 0,
        })
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn require(&self, name: &str) -> Result<(), DomainError> {
        if self.has_column(name) {
            Ok(())
        } else {
            Err(DomainError::MissingColumn {
                column: name.to_string(),
                stage: self.stage.to_string(),
            })
        }
    }

    pub fn count_where(&self, predicate: &str) -> Result<usize, RealtyError> {
        Ok(self
            .connector
            .query_scalar(&count_rows(&self.relation, Some(predicate)))? as usize)
    }

    /// First row (by `_row`) where `predicate` holds on `column`, reported as
    /// an uncoercible value.
    pub fn reject_first(&self, column: &str, predicate: &str) -> Result<(), RealtyError> {
        self.require(column)?;
        let hit = self.connector.query_table(&format!(
            "SELECT {row} AS listing_row, CAST({col} AS VARCHAR) AS value FROM {rel} WHERE {predicate} ORDER BY {row} LIMIT 1",
            row = ident(ROW_COLUMN),
            col = ident(column),
            rel = ident(&self.relation),
        ))?;
        if hit.is_empty() {
            return Ok(());
        }
        let row = hit
            .get(0, "listing_row")
            .and_then(|v| v.as_number())
            .unwrap_or_default() as usize;
        let value = hit.get(0, "value").map(ToString::to_string).unwrap_or_default();
        Err(DomainError::UncoercibleValue {
            column: column.to_string(),
            row,
            value,
            stage: self.stage.to_string(),
        }
        .into())
    }

    /// Every present cell of `column` must read as a finite number.
    pub fn require_numeric(&self, column: &str) -> Result<(), RealtyError> {
        self.reject_first(column, &not_numeric(&ident(column)))
    }

    /// `SELECT` over the current relation with `replace`d and `drop`ped
    /// columns, keeping rows where `keep` is true.
    pub fn select_sql(&self, replace: &[(&str, String)], drop: &[&str], keep: Option<&str>) -> String {
        let filter = keep.map(|k| format!(" WHERE {k}")).unwrap_or_default();
        format!(
            "SELECT {} FROM {}{} ORDER BY {}",
            projection(&self.columns, replace, drop),
            ident(&self.relation),
            filter,
            ident(ROW_COLUMN)
        )
    }

    /// Materialize `sql` as the next step. Returns the number of rows it removed.
    pub fn step(&mut self, name: &str, sql: &str) -> Result<usize, RealtyError> {
        self.steps += 1;
        let target = format!("{}_{:02}_{}", self.stage, self.steps, name);
        self.connector
            .materialize(&target, sql, Materialization::Table)?;

        let rows = row_count(self.connector, &target)?;
        let columns = column_names(self.connector, &target)?;
        if self.steps > 1 {
            self.connector
                .execute(&format!("DROP TABLE IF EXISTS {}", ident(&self.relation)))?;
        }
        let dropped = self.rows.saturating_sub(rows);
        debug!(stage = self.stage, step = name, rows, dropped, "Step materialized");

        self.relation = target;
        self.columns = columns;
        self.rows = rows;
        Ok(dropped)
    }

    /// Drop the rows for which `predicate` is true.
    pub fn remove_rows(&mut self, rule: &str, predicate: &str) -> Result<usize, RealtyError> {
        let sql = self.select_sql(&[], &[], Some(&unless(predicate)));
        self.step(rule, &sql)
    }

    /// Rewrite columns in place and leave some out.
    pub fn project(
        &mut self,
        name: &str,
        replace: &[(&str, String)],
        drop: &[&str],
    ) -> Result<(), RealtyError> {
        let sql = self.select_sql(replace, drop, None);
        self.step(name, &sql).map(|_| ())
    }

    /// Keep the current relation under `name`.
    pub fn finish(self, name: &str) -> Result<StageResult, RealtyError> {
        if self.steps > 0 {
            self.connector
                .execute(&format!("DROP TABLE IF EXISTS {}", ident(name)))?;
            self.connector.execute(&format!(
                "ALTER TABLE {} RENAME TO {}",
                ident(&self.relation),
                ident(name)
            ))?;
        } else {
            self.connector.materialize(
                name,
                &format!("SELECT * FROM {}", ident(&self.relation)),
                Materialization::Table,
            )?;
        }
        Ok(StageResult {
            relation: name.to_string(),
            rows: self.rows,
            columns: self.columns,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::sql::numeric;
    use crate::domain::table::Value;
    use crate::infrastructure::adapters::DuckDBConnector;
    use anyhow::Result;

    fn listings() -> Result<DuckDBConnector> {
        let connector = DuckDBConnector::new()?;
        connector.execute(
            "CREATE TABLE listings AS SELECT * FROM (VALUES \
             (0, '3', 'True', 'One Story'), \
             (1, NULL, 'False', 'Two'), \
             (2, '2.5', '4', NULL), \
             (3, 'call us', NULL, 'Attic')) t(_row, price, parking, levels)",
        )?;
        Ok(connector)
    }

    #[test]
    fn test_steps_chain_and_clean_up() -> Result<()> {
        let connector = listings()?;
        let mut runner = StageRunner::start(&connector, "clean", "listings")?;
        assert_eq!(runner.rows(), 4);

        let dropped = runner.remove_rows("no_levels", "\"levels\" IS NULL")?;
        assert_eq!(dropped, 1);
        assert_eq!(runner.relation(), "clean_01_no_levels");

        runner.project("parking", &[("parking", numeric("\"parking\""))], &["price"])?;
        assert_eq!(runner.columns(), ["_row", "parking", "levels"]);
        // The previous intermediate is gone, the input is kept
        assert!(connector.fetch_columns("clean_01_no_levels").is_err());
        assert_eq!(row_count(&connector, "listings")?, 4);

        let result = runner.finish("cleaned")?;
        assert_eq!(result.rows, 3);
        let table = read_relation(&connector, "cleaned")?;
        assert_eq!(table.column_names(), vec!["parking", "levels"]);
        let parking: Vec<Value> = table.column("parking").unwrap().to_vec();
        assert_eq!(parking, vec![Value::Number(1.0), Value::Number(0.0), Value::Missing]);
        Ok(())
    }

    #[test]
    fn test_null_predicate_keeps_the_row() -> Result<()> {
        let connector = listings()?;
        let mut runner = StageRunner::start(&connector, "clean", "listings")?;

        // NULL levels makes the predicate NULL, which is not a reason to drop
        let dropped = runner.remove_rows("two", "\"levels\" = 'Two'")?;
        assert_eq!(dropped, 1);
        assert_eq!(runner.rows(), 3);
        Ok(())
    }

    #[test]
    fn test_require_numeric_reports_first_offender() -> Result<()> {
        let connector = listings()?;
        let runner = StageRunner::start(&connector, "merge", "listings")?;

        assert!(runner.require_numeric("parking").is_ok());
        let err = runner.require_numeric("price").unwrap_err();
        match err {
            RealtyError::Domain(DomainError::UncoercibleValue { column, row, value, stage }) => {
                assert_eq!(column, "price");
                assert_eq!(row, 3);
                assert_eq!(value, "call us");
                assert_eq!(stage, "merge");
            }
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[test]
    fn test_missing_column_names_the_stage() -> Result<()> {
        let connector = listings()?;
        let runner = StageRunner::start(&connector, "views", "listings")?;
        assert_eq!(
            runner.require("TotalArea"),
            Err(DomainError::MissingColumn {
                column: "TotalArea".into(),
                stage: "views".into()
            })
        );
        Ok(())
    }

    #[test]
    fn test_finish_without_steps_copies_the_input() -> Result<()> {
        let connector = listings()?;
        let runner = StageRunner::start(&connector, "merge", "listings")?;
        let result = runner.finish("merged")?;
        assert_eq!(result.rows, 4);
        assert_eq!(row_count(&connector, "listings")?, 4);
        assert_eq!(row_count(&connector, "merged")?, 4);
        Ok(())
    }
}
