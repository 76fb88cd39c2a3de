// realty-core/src/application/mod.rs

pub mod clean;
pub mod clean_stage;
pub mod merge_stage;
pub mod pipeline;
pub mod stage;
pub mod views;

// Lets the CLI write `use realty_core::application::{run_project, clean_project}`.
pub use clean::clean_project;
pub use clean_stage::{CleanOutput, run_clean};
pub use merge_stage::{SourceCount, load_sources, run_merge};
pub use pipeline::{
    PipelineOutput, RUN_RESULTS_FILE, RunReport, ViewCount, run_pipeline, run_project, target_dir,
    write_run_report,
};
pub use stage::{StageResult, StageRunner, read_relation};
pub use views::build_views;
