// realty-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// Performance
#![warn(clippy::perf)]

// --- LAYERS ---

// 1. Ports (Interfaces / Traits)
// What the pipeline needs from the outside world (a SQL engine).
pub mod ports;

// 2. Domain (business rules)
// Rename tables, fill policy, vocabularies and the SQL each stage runs.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// DuckDB connector, YAML project config, filesystem helpers.
pub mod infrastructure;

// 4. Application (Use Cases)
// Stage runners, pipeline orchestration and run reports.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::RealtyError;
