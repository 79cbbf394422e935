//! Domain layer - core types.
//!
//! This layer contains the export model, extraction reports,
//! configuration and error types without any IO.

pub mod config;
pub mod error;
pub mod models;

pub use config::{AppConfig, ExtractConfig, FailurePolicy};
pub use error::{AppError, Result};
pub use models::{
    ExportDocument, ExportSummary, ExtractedSource, ExtractionFailure, ExtractionJob,
    ExtractionReport,
};
