pub mod clean;
pub mod error;
pub mod merge;
pub mod source;
pub mod sql;
pub mod table;
pub mod views;

// Handy re-exports to keep imports short elsewhere
pub use error::DomainError;
pub use source::Frame;
pub use table::{Table, Value};
pub use views::{AnalyticalViews, ViewKind};
