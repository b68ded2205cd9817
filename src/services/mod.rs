//! Services around the record set
//!
//! This module contains:
//! - The filter/sort/paginate engine
//! - Loading and validating records from data files
//! - Exporting the filtered table to a document

pub mod data_source;
pub mod engine;
pub mod export;

pub use export::ExportFormat;
