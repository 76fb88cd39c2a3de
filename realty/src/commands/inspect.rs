// realty/src/commands/inspect.rs
//
// USE CASE: Print one analytical view.

use std::path::PathBuf;

use realty_core::application::run_project;
use realty_core::domain::ViewKind;

use super::display;

pub fn execute(project_dir: PathBuf, view: String, limit: usize) -> anyhow::Result<()> {
    let kind = match view.parse::<ViewKind>() {
        Ok(kind) => kind,
        Err(e) => {
            eprintln!("❌ {:?}", miette::Report::new(e));
            std::process::exit(2);
        }
    };

    let (_, output) = match run_project(&project_dir) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR: {:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    };

    let table = output.views.get(kind);
    println!("\n🔍 View '{}' ({} rows)", kind, table.height());
    println!("   Columns: [{}]", table.column_names().join(", "));
    if table.is_empty() {
        println!("   (no rows)");
        return Ok(());
    }
    println!("{}", display::render(table, limit));
    if table.height() > limit {
        println!("   ... {} more rows", table.height() - limit);
    }
    Ok(())
}
