// src/pipeline/mod.rs

//! Command pipelines wiring configuration, importer, and storage together.

pub mod catalog;
pub mod import;
pub mod validate;

pub use catalog::{run_assign, run_list};
pub use import::{run_import, run_import_all};
pub use validate::run_validate;
