//! Domain models for export extraction.
//!
//! These models represent the export documents read from `.epe` files and
//! the jobs and reports produced while extracting their sources.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A decoded export document.
///
/// Only `sources.main` is required; `name` and `id` are carried for
/// inspection and everything else in the file is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    /// Program name as stored by the editor.
    pub name: Option<String>,
    /// Program identifier as stored by the editor.
    pub id: Option<String>,
    /// Text of `sources.main`.
    pub main_source: String,
    /// Keys of any other entries in `sources`, sorted.
    pub other_sources: Vec<String>,
}

impl ExportDocument {
    /// Number of lines in the main source.
    #[must_use]
    pub fn main_line_count(&self) -> usize {
        self.main_source.lines().count()
    }
}

/// One read-parse-write unit: an export file and the source file it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ExtractionJob {
    #[must_use]
    pub const fn new(input: PathBuf, output: PathBuf) -> Self {
        Self { input, output }
    }

    /// File name of the export, for progress messages.
    #[must_use]
    pub fn input_name(&self) -> String {
        file_name_lossy(&self.input)
    }

    /// File name of the produced source file.
    #[must_use]
    pub fn output_name(&self) -> String {
        file_name_lossy(&self.output)
    }
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// A source file that was written (or would be, in a dry run).
#[derive(Debug, Clone)]
pub struct ExtractedSource {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Bytes of source text written.
    pub bytes: usize,
}

/// An export that could not be processed and was skipped.
#[derive(Debug, Clone)]
pub struct ExtractionFailure {
    pub input: PathBuf,
    pub reason: String,
}

/// Outcome of one extraction run over a directory.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of export files matched in the input directory.
    pub matched: usize,
    /// Sources written, in processing order.
    pub extracted: Vec<ExtractedSource>,
    /// Exports skipped because of per-file errors.
    pub failures: Vec<ExtractionFailure>,
    /// Whether files were left untouched.
    pub dry_run: bool,
}

impl ExtractionReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total bytes of source text across all extracted files.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.extracted.iter().map(|s| s.bytes).sum()
    }
}

/// Inspection view of a single export file.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// File name inside the scanned directory.
    pub file_name: String,
    /// Program name stored in the export, if any.
    pub name: Option<String>,
    /// Program id stored in the export, if any.
    pub id: Option<String>,
    /// Line count of the main source.
    pub main_lines: usize,
    /// Byte length of the main source.
    pub main_bytes: usize,
    /// Other entries found under `sources`.
    pub other_sources: Vec<String>,
    /// Last modification time of the export file.
    pub modified: Option<DateTime<Utc>>,
}

impl ExportSummary {
    /// Builds a summary from a decoded document.
    #[must_use]
    pub fn from_document(
        file_name: String,
        doc: ExportDocument,
        modified: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            file_name,
            main_lines: doc.main_line_count(),
            main_bytes: doc.main_source.len(),
            name: doc.name,
            id: doc.id,
            other_sources: doc.other_sources,
            modified,
        }
    }

    /// Display name, falling back to the file name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.file_name)
    }
}
