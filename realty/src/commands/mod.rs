// realty/src/commands/mod.rs

pub mod clean;
pub mod display;
pub mod inspect;
pub mod run;
