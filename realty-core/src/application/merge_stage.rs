// realty-core/src/application/merge_stage.rs

use serde::Serialize;
use std::fs;
use tracing::{debug, info, instrument, warn};

use crate::application::stage::{StageResult, StageRunner, column_names, row_count};
use crate::domain::merge::fill::{FILL_POLICY, FillRule, validate_policy};
use crate::domain::merge::unify::{align_sql, empty_source_sql, unify_sql};
use crate::domain::merge::{
    ALIGNED_RELATION, MERGE_DROP_COLUMNS, MERGED_RELATION, STAGE, consolidate_sql,
};
use crate::domain::source::Frame;
use crate::domain::sql::ident;
use crate::error::RealtyError;
use crate::infrastructure::config::SourcePaths;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::{Connector, Materialization};

#[derive(Debug, Clone, Serialize)]
pub struct SourceCount {
    pub frame: Frame,
    pub rows: usize,
    pub columns: usize,
}

/// Load the three CSV sources as `<frame>_source` tables, at most `limit` rows each.
///
/// A missing file aborts the run. An empty file contributes no rows but still
/// gets the columns its market is known to have, so later stages find them.
pub fn load_sources(
    connector: &dyn Connector,
    paths: &SourcePaths,
    limit: usize,
) -> Result<Vec<SourceCount>, RealtyError> {
    let mut counts = Vec::with_capacity(Frame::ALL.len());
    for frame in Frame::ALL {
        let path = paths.get(frame);
        let metadata = fs::metadata(path).map_err(|_| InfrastructureError::SourceNotFound {
            frame: frame.to_string(),
            path: path.display().to_string(),
        })?;

        let relation = frame.source_relation();
        if metadata.len() == 0 {
            warn!(%frame, path = %path.display(), "Source file is empty, it contributes no rows");
            connector.execute(&empty_source_sql(frame))?;
        } else {
            connector.register_source(&relation, path, limit)?;
        }

        let count = SourceCount {
            frame,
            rows: row_count(connector, &relation)?,
            columns: column_names(connector, &relation)?.len(),
        };
        info!(%frame, rows = count.rows, columns = count.columns, "Source loaded");
        counts.push(count);
    }
    Ok(counts)
}

/// Unify -> align -> consolidate -> drop -> fill, over the loaded sources.
#[instrument(skip_all)]
pub fn run_merge(connector: &dyn Connector) -> Result<StageResult, RealtyError> {
    let mut unified = Vec::with_capacity(Frame::ALL.len());
    for frame in Frame::ALL {
        let raw = column_names(connector, &frame.source_relation())?;
        let relation = frame.unified_relation();
        connector.materialize(&relation, &unify_sql(frame, &raw), Materialization::Table)?;
        debug!(%frame, "Source unified");
        unified.push((frame, column_names(connector, &relation)?));
    }
    connector.materialize(ALIGNED_RELATION, &align_sql(&unified), Materialization::View)?;

    let mut runner = StageRunner::start(connector, STAGE, ALIGNED_RELATION)?;
    let aligned = runner.columns().to_vec();
    runner.step("consolidate", &consolidate_sql(ALIGNED_RELATION, &aligned))?;
    runner.project("drop_columns", &[], MERGE_DROP_COLUMNS)?;

    validate_policy(runner.columns(), FILL_POLICY)?;
    for rule in FILL_POLICY {
        fill(&mut runner, rule)?;
    }

    let merged = runner.finish(MERGED_RELATION)?;
    info!(
        rows = merged.rows,
        columns = merged.columns.len(),
        "Merge stage complete"
    );
    Ok(merged)
}

fn fill(runner: &mut StageRunner<'_>, rule: &FillRule) -> Result<(), RealtyError> {
    for column in rule.numeric_inputs() {
        runner.require_numeric(column)?;
    }

    let missing = runner.count_where(&format!("{} IS NULL", ident(rule.column)))?;
    if rule.is_statistic() && missing > 0 && missing == runner.rows() {
        warn!(
            column = rule.column,
            strategy = rule.strategy.label(),
            "No observed values, column stays missing"
        );
    }

    let expression = rule.expression(runner.relation());
    runner.project(rule.column, &[(rule.column, expression)], &[])?;
    debug!(
        column = rule.column,
        strategy = rule.strategy.label(),
        filled = missing,
        "Missing values filled"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::stage::read_relation;
    use crate::domain::table::{Table, Value};
    use crate::infrastructure::adapters::DuckDBConnector;
    use anyhow::Result;
    use tempfile::TempDir;

    struct Sources {
        _dir: TempDir,
        paths: SourcePaths,
    }

    fn sources(california: &str, melbourne: &str, portugal: &str) -> Result<Sources> {
        let dir = tempfile::tempdir()?;
        let write = |name: &str, content: &str| -> Result<std::path::PathBuf> {
            let path = dir.path().join(name);
            fs::write(&path, content)?;
            Ok(path)
        };
        let paths = SourcePaths {
            california: write("california.csv", california)?,
            melbourne: write("melbourne.csv", melbourne)?,
            portugal: write("portugal.csv", portugal)?,
        };
        Ok(Sources { _dir: dir, paths })
    }

    const CALIFORNIA_HEADER: &str = "price,homeType,bedrooms,bathrooms,levels,yearBuilt,livingArea,streetAddress,garageSpaces,parking";

    const PORTUGAL: &str = "Price,Type,NumberOfBedrooms,NumberOfBathrooms,Floor,Elevator,TotalArea,District,EnergyCertificate,TotalRooms,Garage\n\
        100,Apartment,1,1,,True,60,Lisboa,C,,\n\
        300,House,,2,,,150,,D,6,True\n\
        500,Apartment,3,1,5th Floor,False,,Porto,D,,\n";

    fn merged(sources: &Sources) -> Result<Table> {
        let connector = DuckDBConnector::new()?;
        load_sources(&connector, &sources.paths, 1_000)?;
        let result = run_merge(&connector)?;
        Ok(read_relation(&connector, &result.relation)?)
    }

    fn col(table: &Table, name: &str) -> Vec<Value> {
        table.column(name).unwrap().to_vec()
    }

    fn three_markets() -> Result<Sources> {
        sources(
            &format!("{CALIFORNIA_HEADER}\n10,CONDO,2,1,One Story,0,90,1 A St,1,\n"),
            "Price,Type,Bedroom2,Bathroom,Car,YearBuilt\n20,h,3,2,2,1990\n30,u,,1,NA,2000\n",
            PORTUGAL,
        )
    }

    #[test]
    fn test_merge_is_positional_with_priority() -> Result<()> {
        let table = merged(&three_markets()?)?;

        assert_eq!(table.height(), 3);
        // Row i of every source lands on row i; California wins row 0
        assert_eq!(
            col(&table, "price"),
            vec![Value::Number(10.0), Value::Number(30.0), Value::Number(500.0)]
        );
        assert_eq!(
            col(&table, "frame"),
            vec!["california".into(), "melbourne".into(), "portugal".into()]
        );
        assert_eq!(col(&table, "home_type"), vec!["CONDO".into(), "u".into(), "Apartment".into()]);
        assert!(table.column_names().iter().all(|n| !n.ends_with("_melb") && !n.ends_with("_port")));
        assert!(!table.has_column("_row"));
        Ok(())
    }

    #[test]
    fn test_fill_policy_over_sources() -> Result<()> {
        let table = merged(&three_markets()?)?;

        // California's 0 shadows Melbourne's 1990, then is cleared: median of 2000 alone
        assert_eq!(col(&table, "year_built"), vec![Value::Number(2000.0); 3]);
        // Row 1 has no bedrooms anywhere: median(2, 3)
        assert_eq!(table.get(1, "bedrooms"), Some(&Value::Number(2.5)));
        // Observed 6 is kept, the others are bedrooms + bathrooms
        assert_eq!(
            col(&table, "total_rooms"),
            vec![Value::Number(3.0), Value::Number(6.0), Value::Number(4.0)]
        );
        assert_eq!(
            col(&table, "parking_spaces"),
            vec![Value::Number(2.0), Value::Number(0.0), Value::Number(0.0)]
        );
        assert_eq!(
            col(&table, "Elevator"),
            vec![Value::Bool(true), Value::Bool(false), Value::Bool(false)]
        );
        assert_eq!(col(&table, "District")[1], Value::from("Unknown"));
        assert_eq!(col(&table, "District")[2], Value::from("Porto"));
        assert_eq!(col(&table, "street_address")[1], Value::from("Unknown"));
        assert_eq!(
            col(&table, "garage_spaces"),
            vec![Value::Number(1.0), Value::Bool(true), Value::Number(0.0)]
        );
        assert_eq!(col(&table, "levels")[1], Value::from("One Story"));
        assert_eq!(col(&table, "TotalArea")[2], Value::Number(105.0));
        Ok(())
    }

    #[test]
    fn test_mode_tie_goes_to_first_seen() -> Result<()> {
        let s = sources(
            &format!("{CALIFORNIA_HEADER}\n1,CONDO,1,1,,,,,,\n"),
            "Price,Type\n",
            "Price,Type,Elevator,TotalArea,District,EnergyCertificate,TotalRooms\n\
             1,House,,,,B,\n2,House,,,,,\n3,House,,,,A,\n4,House,,,,A,\n5,House,,,,B,\n",
        )?;
        let table = merged(&s)?;
        // A and B both appear twice; B is seen first
        assert_eq!(table.get(1, "EnergyCertificate"), Some(&Value::from("B")));
        // Nothing observed: stays missing
        assert!(col(&table, "living_area").iter().all(Value::is_missing));
        Ok(())
    }

    #[test]
    fn test_text_in_median_column_is_fatal() -> Result<()> {
        let s = sources(
            &format!("{CALIFORNIA_HEADER}\ncall us,CONDO,2,1,,,,,,\n"),
            "Price,Type\n",
            PORTUGAL,
        )?;
        let connector = DuckDBConnector::new()?;
        load_sources(&connector, &s.paths, 1_000)?;
        let err = run_merge(&connector).unwrap_err();
        assert!(err.to_string().contains("'call us' in column 'price' (row 0)"), "{err}");
        Ok(())
    }

    #[test]
    fn test_missing_policy_column_is_fatal() -> Result<()> {
        let s = sources(
            "price,homeType,bedrooms,bathrooms,levels\n1,CONDO,1,1,\n",
            "Price,Type\n",
            "Price,Type\n",
        )?;
        let connector = DuckDBConnector::new()?;
        load_sources(&connector, &s.paths, 1_000)?;
        let err = run_merge(&connector).unwrap_err();
        assert!(err.to_string().contains("required by the merge stage"), "{err}");
        Ok(())
    }

    #[test]
    fn test_empty_file_is_seeded_with_its_schema() -> Result<()> {
        let s = sources("price,homeType\n1,CONDO\n", "Price,Type\n2,h\n", "")?;
        let connector = DuckDBConnector::new()?;
        let counts = load_sources(&connector, &s.paths, 1_000)?;

        assert_eq!(counts[2].rows, 0);
        let columns = column_names(&connector, "portugal_source")?;
        for expected in ["Price", "Floor", "TotalArea", "Elevator", "District", "EnergyCertificate"] {
            assert!(columns.iter().any(|c| c == expected), "{expected}");
        }
        Ok(())
    }

    #[test]
    fn test_missing_file_is_fatal() -> Result<()> {
        let mut s = sources("price\n1\n", "Price\n2\n", "Price\n3\n")?;
        s.paths.melbourne = s.paths.melbourne.with_file_name("nowhere.csv");
        let connector = DuckDBConnector::new()?;
        let err = load_sources(&connector, &s.paths, 1_000).unwrap_err();
        assert!(err.to_string().contains("melbourne"), "{err}");
        Ok(())
    }
}
