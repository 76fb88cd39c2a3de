// realty-core/src/domain/table/mod.rs

pub mod columnar;
pub mod value;

pub use columnar::{Column, Table};
pub use value::Value;
