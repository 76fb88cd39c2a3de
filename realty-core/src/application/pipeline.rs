// realty-core/src/application/pipeline.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, instrument};

use crate::domain::sql::ROW_COLUMN;
use crate::error::RealtyError;
use crate::ports::connector::Connector;

// Stages
use crate::application::clean_stage::run_clean;
use crate::application::merge_stage::{SourceCount, load_sources, run_merge};
use crate::application::stage::read_relation;
use crate::application::views::build_views;

// Domain
use crate::domain::clean::DropEntry;
use crate::domain::table::Table;
use crate::domain::views::{AnalyticalViews, ViewKind};

// Infrastructure
use crate::infrastructure::adapters::DuckDBConnector;
use crate::infrastructure::config::{ProjectConfig, SourcePaths, load_project_config};
use crate::infrastructure::fs::write_json;

pub const RUN_RESULTS_FILE: &str = "run_results.json";

#[derive(Debug, Clone, Serialize)]
pub struct ViewCount {
    pub view: ViewKind,
    pub rows: usize,
}

/// Row counts for every stage of one run, written to `target/run_results.json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub engine: String,
    pub row_limit: usize,
    pub sources: Vec<SourceCount>,
    pub merged_rows: usize,
    pub merged_columns: usize,
    pub cleaned_rows: usize,
    pub cleaned_columns: usize,
    pub drops: Vec<DropEntry>,
    pub views: Vec<ViewCount>,
    pub duration_ms: u128,
}

impl RunReport {
    pub fn dropped_total(&self) -> usize {
        self.drops.iter().map(|d| d.dropped).sum()
    }
}

/// What a run hands back. `merged` and `cleaned` stay queryable on the
/// connector; the cleaned listings and the views are read back here.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub cleaned: Table,
    pub views: AnalyticalViews,
    pub report: RunReport,
}

/// Load, merge, clean and slice. Any fatal rule violation aborts the run.
#[instrument(skip(connector, paths), fields(engine = connector.engine_name()))]
pub fn run_pipeline(
    connector: &dyn Connector,
    paths: &SourcePaths,
    limit: usize,
) -> Result<PipelineOutput, RealtyError> {
    let start_time = Instant::now();

    // 1. ACQUISITION
    let sources = load_sources(connector, paths, limit)?;

    // 2. MERGE
    let merged = run_merge(connector)?;

    // 3. CLEAN
    let cleaned = run_clean(connector, &merged.relation)?;

    // 4. VIEWS
    let views = build_views(connector, &cleaned.result.relation)?;
    let table = read_relation(connector, &cleaned.result.relation)?;

    let report = RunReport {
        generated_at: Utc::now(),
        engine: connector.engine_name().to_string(),
        row_limit: limit,
        sources,
        merged_rows: merged.rows,
        merged_columns: table_width(&merged.columns),
        cleaned_rows: cleaned.result.rows,
        cleaned_columns: table_width(&cleaned.result.columns),
        drops: cleaned.drops,
        views: views
            .iter()
            .map(|(view, table)| ViewCount {
                view,
                rows: table.height(),
            })
            .collect(),
        duration_ms: start_time.elapsed().as_millis(),
    };
    info!(
        merged = report.merged_rows,
        cleaned = report.cleaned_rows,
        dropped = report.dropped_total(),
        "Pipeline complete"
    );

    Ok(PipelineOutput {
        cleaned: table,
        views,
        report,
    })
}

// The row ordinal is bookkeeping, not a listing column
fn table_width(columns: &[String]) -> usize {
    columns.iter().filter(|c| *c != ROW_COLUMN).count()
}

/// Directory run artifacts go to, relative to the project unless absolute.
pub fn target_dir(project_dir: &Path, config: &ProjectConfig) -> PathBuf {
    project_dir.join(&config.target_path)
}

pub fn write_run_report(target_dir: &Path, report: &RunReport) -> Result<PathBuf, RealtyError> {
    let path = target_dir.join(RUN_RESULTS_FILE);
    write_json(&path, report)?;
    Ok(path)
}

/// Run a whole project from its `realty.yaml` on an in-memory DuckDB.
pub fn run_project(project_dir: &Path) -> Result<(ProjectConfig, PipelineOutput), RealtyError> {
    let config = load_project_config(project_dir)?;
    let connector = DuckDBConnector::new()?;
    let output = run_pipeline(&connector, &config.sources, config.row_limit)?;
    Ok((config, output))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::table::Value;
    use anyhow::Result;
    use std::fs;
    use tempfile::TempDir;

    fn sources() -> Result<(TempDir, SourcePaths)> {
        let dir = tempfile::tempdir()?;
        let write = |name: &str, content: &str| -> Result<PathBuf> {
            let path = dir.path().join(name);
            fs::write(&path, content)?;
            Ok(path)
        };
        let paths = SourcePaths {
            california: write(
                "ca.csv",
                "price,homeType,bedrooms,bathrooms,levels,parking,garageSpaces,yearBuilt,livingArea,streetAddress\n\
                 500000,CONDO,2,1,One Story,True,1,1995,80,1 Main St\n\
                 300000,SINGLE_FAMILY,0,0,,False,0,0,120,\n",
            )?,
            melbourne: write("melb.csv", "Price,Type,Bedroom2,Bathroom,Car\n900000,h,3,2,2\n")?,
            portugal: write(
                "pt.csv",
                "Price,Type,NumberOfBedrooms,NumberOfBathrooms,Floor,Elevator,TotalArea,District,EnergyCertificate,TotalRooms\n\
                 150000,Apartment,1,1,3rd Floor,True,60,Lisboa,C,2\n\
                 90000,Farm,2,1,,,5000,,C,\n",
            )?,
        };
        Ok((dir, paths))
    }

    #[test]
    fn test_run_pipeline_reports_every_stage() -> Result<()> {
        let (_dir, paths) = sources()?;
        let connector = DuckDBConnector::new()?;
        let output = run_pipeline(&connector, &paths, 1_000)?;
        let report = &output.report;

        assert_eq!(report.engine, "duckdb");
        assert_eq!(report.sources.len(), 3);
        assert_eq!(report.merged_rows, 2);
        // Row 1 resolves to a Californian house with no rooms
        assert_eq!(report.cleaned_rows, 1);
        assert_eq!(report.cleaned_rows + report.dropped_total(), report.merged_rows);
        assert_eq!(report.views.len(), 4);
        assert_eq!(output.cleaned.height(), report.cleaned_rows);
        assert_eq!(output.cleaned.width(), report.cleaned_columns);
        assert!(!output.cleaned.has_column(ROW_COLUMN));
        Ok(())
    }

    #[test]
    fn test_row_limit_caps_each_source() -> Result<()> {
        let (_dir, paths) = sources()?;
        let connector = DuckDBConnector::new()?;
        let output = run_pipeline(&connector, &paths, 1)?;
        assert!(output.report.sources.iter().all(|s| s.rows <= 1));
        assert_eq!(output.report.merged_rows, 1);
        // CONDO with parking True and one garage space
        assert_eq!(output.cleaned.get(0, "parking_spaces"), Some(&Value::Number(2.0)));
        Ok(())
    }

    #[test]
    fn test_missing_source_aborts() -> Result<()> {
        let (_dir, mut paths) = sources()?;
        paths.portugal = paths.portugal.with_file_name("gone.csv");
        let connector = DuckDBConnector::new()?;
        assert!(run_pipeline(&connector, &paths, 10).is_err());
        Ok(())
    }
}
