//! Source extraction service.
//!
//! Scans a directory for export files and writes the main source of each
//! one into an output directory, one file at a time.

use std::path::Path;

use crate::domain::{
    AppError, ExportSummary, ExtractConfig, ExtractedSource, ExtractionFailure, ExtractionJob,
    ExtractionReport, FailurePolicy, Result,
};
use crate::infrastructure::{list_exports, modified_time, read_export, require_dir, write_source};

use super::parser::parse_export;

/// Options for source extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Extension of export files, without the dot.
    pub export_extension: String,
    /// Extension of produced source files, without the dot.
    pub source_extension: String,
    /// What to do when one export fails.
    pub on_error: FailurePolicy,
    /// Process exports in file name order.
    pub sort: bool,
    /// Parse exports but write nothing.
    pub dry_run: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::from_config(&ExtractConfig::default())
    }
}

impl ExtractOptions {
    /// Builds options from the `[extract]` configuration section.
    #[must_use]
    pub fn from_config(config: &ExtractConfig) -> Self {
        Self {
            export_extension: config.export_extension.clone(),
            source_extension: config.source_extension.clone(),
            on_error: config.on_error,
            sort: config.sort,
            dry_run: false,
        }
    }
}

/// Derives the source file name for an export file name.
///
/// Only the trailing `.{export_extension}` is replaced, so
/// `my.pattern.epe` becomes `my.pattern.js`. Returns `None` if the name
/// does not carry the export extension.
#[must_use]
pub fn source_file_name(
    export_name: &str,
    export_extension: &str,
    source_extension: &str,
) -> Option<String> {
    export_name
        .strip_suffix(export_extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .map(|stem| format!("{stem}.{source_extension}"))
}

/// Lists the extraction jobs for every export in `input_dir`.
///
/// # Errors
/// Returns error if `input_dir` cannot be listed.
pub fn plan_jobs(
    input_dir: &Path,
    output_dir: &Path,
    options: &ExtractOptions,
) -> Result<Vec<ExtractionJob>> {
    let mut exports = list_exports(input_dir, &options.export_extension)?;

    if options.sort {
        exports.sort();
    }

    let jobs = exports
        .into_iter()
        .filter_map(|input| {
            let name = input.file_name()?.to_str()?;
            let output_name =
                source_file_name(name, &options.export_extension, &options.source_extension)?;
            let output = output_dir.join(output_name);
            Some(ExtractionJob::new(input, output))
        })
        .collect();

    Ok(jobs)
}

/// Extracts every export in `input_dir` into `output_dir`, calling
/// `on_progress` before each export is processed.
///
/// The output directory is only required to exist when writing; a dry run
/// reports the paths it would write.
///
/// # Errors
/// Returns error if a required directory is missing, or if an export fails
/// under the `Abort` policy.
pub fn extract_exports_with<F>(
    input_dir: &Path,
    output_dir: &Path,
    options: &ExtractOptions,
    mut on_progress: F,
) -> Result<ExtractionReport>
where
    F: FnMut(&ExtractionJob),
{
    require_dir(input_dir)?;
    if !options.dry_run {
        require_dir(output_dir)?;
    }

    let jobs = plan_jobs(input_dir, output_dir, options)?;
    tracing::info!("Found {} export(s) in {}", jobs.len(), input_dir.display());

    let mut report = ExtractionReport {
        matched: jobs.len(),
        dry_run: options.dry_run,
        ..Default::default()
    };

    for job in jobs {
        on_progress(&job);

        match extract_job(&job, options.dry_run) {
            Ok(bytes) => {
                tracing::debug!("Wrote {} bytes to {}", bytes, job.output.display());
                report.extracted.push(ExtractedSource {
                    input: job.input,
                    output: job.output,
                    bytes,
                });
            }
            Err(e) => match options.on_error {
                FailurePolicy::Abort => return Err(e),
                FailurePolicy::Skip => {
                    tracing::warn!("Skipping {}: {}", job.input.display(), e);
                    report.failures.push(ExtractionFailure {
                        input: job.input,
                        reason: e.to_string(),
                    });
                }
            },
        }
    }

    tracing::info!(
        "Extracted {} of {} export(s)",
        report.extracted.len(),
        report.matched
    );

    Ok(report)
}

/// Reads, decodes and writes a single export. Returns the source length.
fn extract_job(job: &ExtractionJob, dry_run: bool) -> Result<usize> {
    let data = read_export(&job.input)?;
    let doc = parse_export(&job.input, &data)?;

    if !dry_run {
        write_source(&job.output, &doc.main_source)?;
    }

    Ok(doc.main_source.len())
}

/// Decodes every export in `input_dir` for inspection.
///
/// Failures are collected under the `Skip` policy and returned alongside
/// the summaries.
///
/// # Errors
/// Returns error if `input_dir` cannot be listed, or if an export fails
/// under the `Abort` policy.
pub fn inspect_exports(
    input_dir: &Path,
    options: &ExtractOptions,
) -> Result<(Vec<ExportSummary>, Vec<ExtractionFailure>)> {
    let mut exports = list_exports(input_dir, &options.export_extension)?;
    if options.sort {
        exports.sort();
    }

    let mut summaries = Vec::new();
    let mut failures = Vec::new();

    for path in exports {
        let decoded = read_export(&path).and_then(|data| parse_export(&path, &data));

        match decoded {
            Ok(doc) => {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .ok_or_else(|| AppError::malformed(&path, "path has no file name"))?;
                summaries.push(ExportSummary::from_document(
                    file_name,
                    doc,
                    modified_time(&path),
                ));
            }
            Err(e) => match options.on_error {
                FailurePolicy::Abort => return Err(e),
                FailurePolicy::Skip => {
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                    failures.push(ExtractionFailure {
                        input: path,
                        reason: e.to_string(),
                    });
                }
            },
        }
    }

    Ok((summaries, failures))
}
