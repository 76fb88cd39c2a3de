// realty-core/src/domain/table/columnar.rs

use super::value::Value;
use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

/// Column-major snapshot of a relation, used for display and reporting.
///
/// The stages themselves run inside the engine; a `Table` is only ever built
/// from a query result and never transformed in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from named columns, checking that they all have the same length.
    pub fn from_columns<N: Into<String>>(
        columns: impl IntoIterator<Item = (N, Vec<Value>)>,
    ) -> Result<Self, DomainError> {
        let mut table = Table::new();
        for (index, (name, values)) in columns.into_iter().enumerate() {
            let name = name.into();
            if index == 0 {
                table.height = values.len();
            } else if values.len() != table.height {
                return Err(DomainError::ShapeMismatch {
                    column: name,
                    expected: table.height,
                    actual: values.len(),
                });
            }
            table.columns.push(Column { name, values });
        }
        Ok(table)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.column(column).and_then(|values| values.get(row))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_rejects_ragged_input() {
        let err = Table::from_columns([
            ("price", vec![Value::from(1.0), Value::from(2.0)]),
            ("frame", vec![Value::from("california")]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::ShapeMismatch {
                column: "frame".into(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_lookup_by_name() {
        let table = Table::from_columns([
            ("price", vec![Value::from(1.0), Value::Missing]),
            ("frame", vec!["california".into(), "portugal".into()]),
        ])
        .unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.width(), 2);
        assert_eq!(table.column_names(), vec!["price", "frame"]);
        assert_eq!(table.get(1, "frame"), Some(&Value::from("portugal")));
        assert_eq!(table.get(1, "price"), Some(&Value::Missing));
        assert_eq!(table.get(2, "price"), None);
        assert!(table.column("levels").is_none());
        assert!(!table.has_column("levels"));
    }

    #[test]
    fn test_empty_input_is_an_empty_table() {
        let table = Table::from_columns(Vec::<(String, Vec<Value>)>::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.width(), 0);
    }
}
