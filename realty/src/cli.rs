// realty/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "realty")]
#[command(about = "Unifies and cleans California, Melbourne and Portugal listing data", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the pipeline (Load -> Merge -> Clean -> Views)
    Run {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Rows shown per analytical view (0 hides the previews)
        #[arg(long, default_value = "5")]
        preview: usize,
    },

    /// 🔍 Runs the pipeline and prints one analytical view
    Inspect {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// price_area | elevator_price | parking_price | california_two_bed
        #[arg(long, short)]
        view: String,

        /// Number of rows to display
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// 🧹 Cleans run artifacts (target/ folder)
    Clean {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_run_defaults() -> Result<()> {
        let args = Cli::parse_from(["realty", "run"]);
        match args.command {
            Commands::Run {
                project_dir,
                preview,
            } => {
                assert_eq!(project_dir.to_string_lossy(), ".");
                assert_eq!(preview, 5);
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_run_preview() -> Result<()> {
        let args = Cli::parse_from(["realty", "run", "--preview", "0", "--project-dir", "/tmp"]);
        match args.command {
            Commands::Run {
                project_dir,
                preview,
            } => {
                assert_eq!(project_dir.to_string_lossy(), "/tmp");
                assert_eq!(preview, 0);
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_inspect() -> Result<()> {
        let args = Cli::parse_from(["realty", "inspect", "-v", "parking_price", "--limit", "10"]);
        match args.command {
            Commands::Inspect {
                view,
                limit,
                project_dir,
            } => {
                assert_eq!(view, "parking_price");
                assert_eq!(limit, 10);
                assert_eq!(project_dir.to_string_lossy(), ".");
                Ok(())
            }
            _ => bail!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_inspect_requires_view() {
        assert!(Cli::try_parse_from(["realty", "inspect"]).is_err());
    }
}
