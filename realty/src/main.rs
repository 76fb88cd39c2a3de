// realty/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug realty run ... to see every dropped row
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            project_dir,
            preview,
        } => commands::run::execute(project_dir, preview),
        Commands::Inspect {
            project_dir,
            view,
            limit,
        } => commands::inspect::execute(project_dir, view, limit),
        Commands::Clean { project_dir } => commands::clean::execute(project_dir),
    }
}
