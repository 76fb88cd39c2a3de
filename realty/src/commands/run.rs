// realty/src/commands/run.rs
//
// USE CASE: Run the listing pipeline.

use anyhow::Context;
use std::path::PathBuf;
use tracing::debug;

use realty_core::application::{run_pipeline, target_dir, write_run_report};
use realty_core::infrastructure::adapters::DuckDBConnector;
use realty_core::infrastructure::config::load_project_config;

use super::display;

pub fn execute(project_dir: PathBuf, preview: usize) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Project: {} (v{})", config.name, config.version);
    debug!(sources = ?config.sources, row_limit = config.row_limit, "Configuration loaded");

    // B. Engine adapter
    println!("   Engine: DuckDB 🦆");
    let connector = DuckDBConnector::new().context("Failed to initialize DuckDB")?;

    // C. Run the Pipeline (Application Layer)
    let output = match run_pipeline(&connector, &config.sources, config.row_limit) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR: {:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    };
    let report = &output.report;

    println!("\n📦 Sources");
    for source in &report.sources {
        println!(
            "   {:<12} {:>8} rows  {:>3} columns",
            source.frame, source.rows, source.columns
        );
    }
    println!("🔗 Merged:  {} rows, {} columns", report.merged_rows, report.merged_columns);
    println!("🧽 Cleaned: {} rows, {} columns", report.cleaned_rows, report.cleaned_columns);
    for drop in report.drops.iter().filter(|d| d.dropped > 0) {
        println!("   ➜ {:<28} -{}", drop.rule, drop.dropped);
    }

    for (kind, table) in output.views.iter() {
        println!("\n📊 {} ({} rows)", kind, table.height());
        if preview > 0 && !table.is_empty() {
            println!("{}", display::render(table, preview));
        }
    }

    // D. Run report
    let path = write_run_report(&target_dir(&project_dir, &config), report)
        .context("Failed to write run report")?;
    println!("\n📝 Run report: {}", path.display());
    println!("✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());

    Ok(())
}
