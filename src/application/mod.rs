//! Application layer - use cases and orchestration.
//!
//! This layer contains the extraction logic and the formatting
//! of its results.

pub mod batch;
pub mod extractor;
pub mod formatter;
pub mod parser;

pub use batch::{extract_all_profiles, BatchEvent};
pub use extractor::{extract_exports_with, inspect_exports, ExtractOptions};
pub use formatter::{
    format_exports_json, format_exports_table, format_failures, format_profiles_table,
    format_report, OutputFormat,
};
