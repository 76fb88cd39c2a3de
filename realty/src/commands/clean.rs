// realty/src/commands/clean.rs
//
// USE CASE: Clean run artifacts.

use std::path::PathBuf;

use realty_core::application::clean_project;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    match clean_project(&project_dir) {
        Ok(Some(path)) => println!("   🗑️  Artifact removed: {}", path.display()),
        Ok(None) => println!("   Nothing to clean."),
        Err(e) => {
            eprintln!("❌ Clean failed: {:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    }
    Ok(())
}
