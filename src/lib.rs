// src/lib.rs

//! ELWIS Question Catalog Importer Library

pub mod error;
pub mod importer;
pub mod models;
pub mod pipeline;
pub mod storage;
pub mod utils;

pub use error::{AppError, Result};
