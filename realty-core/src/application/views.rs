// realty-core/src/application/views.rs

use tracing::{debug, instrument};

use crate::application::stage::column_names;
use crate::domain::error::DomainError;
use crate::domain::sql::ident;
use crate::domain::views::{AnalyticalViews, STAGE, ViewKind};
use crate::error::RealtyError;
use crate::ports::connector::{Connector, Materialization};

/// Create the four views over `cleaned` and read each one back.
///
/// Views are read-only slices: the cleaned relation is never modified.
#[instrument(skip(connector))]
pub fn build_views(connector: &dyn Connector, cleaned: &str) -> Result<AnalyticalViews, RealtyError> {
    let columns = column_names(connector, cleaned)?;
    for kind in ViewKind::ALL {
        for required in kind.required_columns() {
            if !columns.iter().any(|c| c == required) {
                return Err(DomainError::MissingColumn {
                    column: required.to_string(),
                    stage: STAGE.to_string(),
                }
                .into());
            }
        }
    }

    let read = |kind: ViewKind| -> Result<_, RealtyError> {
        connector.materialize(kind.name(), &kind.sql(cleaned), Materialization::View)?;
        let table = connector.query_table(&format!("SELECT * FROM {}", ident(kind.name())))?;
        debug!(view = kind.name(), rows = table.height(), "View built");
        Ok(table)
    };

    Ok(AnalyticalViews {
        price_area: read(ViewKind::PriceArea)?,
        elevator_price: read(ViewKind::ElevatorPrice)?,
        parking_price: read(ViewKind::ParkingPrice)?,
        california_two_bed: read(ViewKind::CaliforniaTwoBed)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::table::Value;
    use crate::infrastructure::adapters::DuckDBConnector;
    use anyhow::Result;

    fn cleaned() -> Result<DuckDBConnector> {
        let connector = DuckDBConnector::new()?;
        connector.execute(
            "CREATE TABLE cleaned (_row BIGINT, frame VARCHAR, home_type VARCHAR, price DOUBLE, \
             \"TotalArea\" DOUBLE, \"Elevator\" VARCHAR, parking_spaces DOUBLE, bedrooms DOUBLE, year_built DOUBLE)",
        )?;
        connector.execute(
            "INSERT INTO cleaned VALUES \
             (0, 'california', 'Multi-Unit Housing', 500, NULL, 'False', 1, 2, 1990), \
             (1, 'melbourne', 'House', 600, NULL, 'False', 2, 2, 2000), \
             (2, 'portugal', 'Multi-Unit Housing', 700, 70, 'True', 0, 2, 2010), \
             (3, 'california', 'House', 800, 80, 'False', 3, 2, 1980)",
        )?;
        Ok(connector)
    }

    #[test]
    fn test_views_select_expected_rows_and_columns() -> Result<()> {
        let connector = cleaned()?;
        let views = build_views(&connector, "cleaned")?;

        assert_eq!(views.price_area.height(), 3);
        assert_eq!(views.price_area.column_names(), vec!["price", "TotalArea", "frame"]);
        // Missing area is kept, not filtered out
        assert_eq!(views.price_area.get(0, "TotalArea"), Some(&Value::Missing));

        assert_eq!(views.elevator_price.height(), 2);
        assert_eq!(views.elevator_price.get(1, "Elevator"), Some(&Value::Bool(true)));

        assert_eq!(views.parking_price.height(), 4);

        assert_eq!(views.california_two_bed.height(), 1);
        assert_eq!(
            views.california_two_bed.get(0, "year_built"),
            Some(&Value::Number(1990.0))
        );

        // Slicing never mutates the cleaned relation
        assert_eq!(connector.query_scalar("SELECT count(*) FROM cleaned")?, 4);
        Ok(())
    }

    #[test]
    fn test_missing_view_column_is_fatal() -> Result<()> {
        let connector = cleaned()?;
        connector.execute("ALTER TABLE cleaned DROP COLUMN \"TotalArea\"")?;
        let err = build_views(&connector, "cleaned").unwrap_err();
        assert!(matches!(
            err,
            RealtyError::Domain(DomainError::MissingColumn { ref column, ref stage })
                if column == "TotalArea" && stage == "views"
        ));
        Ok(())
    }
}
