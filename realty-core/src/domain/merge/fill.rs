// realty-core/src/domain/merge/fill.rs

use crate::domain::error::DomainError;
use crate::domain::sql::{ROW_COLUMN, ident, literal, numeric};
use crate::domain::table::Value;

const STAGE: &str = "merge";

/// Literal used by constant fills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constant {
    Number(f64),
    Bool(bool),
    Text(&'static str),
}

impl Constant {
    pub fn to_value(self) -> Value {
        match self {
            Constant::Number(n) => Value::Number(n),
            Constant::Bool(b) => Value::Bool(b),
            Constant::Text(s) => Value::from(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillStrategy {
    Constant(Constant),
    /// Column median over all sources. With `zero_is_missing`, literal zeros are
    /// cleared first and the median is computed without them.
    Median { zero_is_missing: bool },
    /// Most frequent value, first encountered wins a tie.
    Mode,
    /// Row-wise sum of two (already filled) columns.
    RowSum(&'static str, &'static str),
}

impl FillStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            FillStrategy::Constant(_) => "constant",
            FillStrategy::Median { .. } => "median",
            FillStrategy::Mode => "mode",
            FillStrategy::RowSum(..) => "row_sum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillRule {
    pub column: &'static str,
    pub strategy: FillStrategy,
}

const fn rule(column: &'static str, strategy: FillStrategy) -> FillRule {
    FillRule { column, strategy }
}

/// Ordered missing-value policy of the merge stage.
///
/// `total_rooms` comes after `bedrooms` and `bathrooms` so the sum sees filled values.
pub const FILL_POLICY: &[FillRule] = &[
    rule("parking_spaces", FillStrategy::Constant(Constant::Number(0.0))),
    rule("year_built", FillStrategy::Median { zero_is_missing: true }),
    rule("price", FillStrategy::Median { zero_is_missing: false }),
    rule("TotalArea", FillStrategy::Median { zero_is_missing: false }),
    rule("Elevator", FillStrategy::Constant(Constant::Bool(false))),
    rule("District", FillStrategy::Constant(Constant::Text("Unknown"))),
    rule("bathrooms", FillStrategy::Median { zero_is_missing: false }),
    rule("bedrooms", FillStrategy::Median { zero_is_missing: false }),
    rule("total_rooms", FillStrategy::RowSum("bedrooms", "bathrooms")),
    rule("street_address", FillStrategy::Constant(Constant::Text("Unknown"))),
    rule("garage_spaces", FillStrategy::Constant(Constant::Number(0.0))),
    rule("living_area", FillStrategy::Median { zero_is_missing: false }),
    rule("levels", FillStrategy::Constant(Constant::Text("One Story"))),
    rule("EnergyCertificate", FillStrategy::Mode),
];

/// Every column a policy touches or reads, in policy order.
pub fn referenced_columns(policy: &[FillRule]) -> Vec<&'static str> {
    let mut names = Vec::new();
    for rule in policy {
        let mut push = |name: &'static str| {
            if !names.contains(&name) {
                names.push(name);
            }
        };
        push(rule.column);
        if let FillStrategy::RowSum(a, b) = rule.strategy {
            push(a);
            push(b);
        }
    }
    names
}

/// Fail loudly if a column the policy relies on is absent.
pub fn validate_policy(columns: &[String], policy: &[FillRule]) -> Result<(), DomainError> {
    for name in referenced_columns(policy) {
        if !columns.iter().any(|c| c == name) {
            return Err(DomainError::MissingColumn {
                column: name.to_string(),
                stage: STAGE.to_string(),
            });
        }
    }
    Ok(())
}

impl FillRule {
    /// Columns whose present cells must read as numbers before this rule runs.
    pub fn numeric_inputs(&self) -> Vec<&'static str> {
        match self.strategy {
            FillStrategy::Median { .. } => vec![self.column],
            FillStrategy::RowSum(a, b) => vec![self.column, a, b],
            FillStrategy::Constant(_) | FillStrategy::Mode => Vec::new(),
        }
    }

    /// Whether the fill value is computed from the column's own observations.
    pub fn is_statistic(&self) -> bool {
        matches!(self.strategy, FillStrategy::Median { .. } | FillStrategy::Mode)
    }

    /// New value of the rule's column, computed over `relation`.
    ///
    /// Constant and mode fills keep the column as text. Median and row-sum
    /// fills yield a number, so numeric text becomes a real number. An
    /// all-missing column has no median or mode and stays missing.
    pub fn expression(&self, relation: &str) -> String {
        let column = ident(self.column);
        match self.strategy {
            FillStrategy::Constant(constant) => format!(
                "COALESCE(CAST({column} AS VARCHAR), {})",
                literal(&constant.to_value().to_string())
            ),
            FillStrategy::Median { zero_is_missing } => {
                let observed = if zero_is_missing {
                    format!("NULLIF({}, 0)", numeric(&column))
                } else {
                    numeric(&column)
                };
                format!(
                    "COALESCE({observed}, (SELECT median({observed}) FROM {}))",
                    ident(relation)
                )
            }
            FillStrategy::Mode => format!(
                "COALESCE(CAST({column} AS VARCHAR), (SELECT CAST({column} AS VARCHAR) FROM {} WHERE {column} IS NOT NULL GROUP BY 1 ORDER BY count(*) DESC, min({}) LIMIT 1))",
                ident(relation),
                ident(ROW_COLUMN)
            ),
            FillStrategy::RowSum(a, b) => format!(
                "COALESCE({}, {} + {})",
                numeric(&column),
                numeric(&ident(a)),
                numeric(&ident(b))
            ),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_columns_are_unique() {
        let columns: Vec<&str> = FILL_POLICY.iter().map(|r| r.column).collect();
        for (i, c) in columns.iter().enumerate() {
            assert!(!columns[i + 1..].contains(c), "{c} filled twice");
        }
    }

    #[test]
    fn test_derived_fill_runs_after_its_dependencies() {
        let position = |name: &str| FILL_POLICY.iter().position(|r| r.column == name).unwrap();
        assert!(position("total_rooms") > position("bedrooms"));
        assert!(position("total_rooms") > position("bathrooms"));
    }

    #[test]
    fn test_missing_policy_column_fails_loudly() {
        let columns: Vec<String> = referenced_columns(FILL_POLICY)
            .into_iter()
            .filter(|c| *c != "TotalArea")
            .map(String::from)
            .collect();
        let err = validate_policy(&columns, FILL_POLICY).unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingColumn {
                column: "TotalArea".into(),
                stage: "merge".into()
            }
        );
    }

    #[test]
    fn test_constant_literals_render_like_cells() {
        let rule = |constant| FillRule {
            column: "c",
            strategy: FillStrategy::Constant(constant),
        };
        assert!(rule(Constant::Number(0.0)).expression("t").ends_with(", '0')"));
        assert!(rule(Constant::Bool(false)).expression("t").ends_with(", 'False')"));
        assert!(rule(Constant::Text("One Story")).expression("t").ends_with(", 'One Story')"));
    }

    #[test]
    fn test_zero_is_cleared_before_median() {
        let rule = FillRule {
            column: "year_built",
            strategy: FillStrategy::Median { zero_is_missing: true },
        };
        let sql = rule.expression("merge_02");
        assert!(sql.starts_with("COALESCE(NULLIF(CASE lower(CAST(\"year_built\" AS VARCHAR))"));
        assert!(sql.contains("(SELECT median(NULLIF("));
        assert!(sql.ends_with("FROM \"merge_02\"))"));
    }

    #[test]
    fn test_mode_ties_break_on_first_row() {
        let rule = FillRule {
            column: "EnergyCertificate",
            strategy: FillStrategy::Mode,
        };
        assert!(rule.expression("t").contains("ORDER BY count(*) DESC, min(\"_row\") LIMIT 1"));
    }

    #[test]
    fn test_numeric_inputs() {
        let total = FILL_POLICY.iter().find(|r| r.column == "total_rooms").unwrap();
        assert_eq!(total.numeric_inputs(), vec!["total_rooms", "bedrooms", "bathrooms"]);
        let district = FILL_POLICY.iter().find(|r| r.column == "District").unwrap();
        assert!(district.numeric_inputs().is_empty());
        assert!(!district.is_statistic());
    }
}
