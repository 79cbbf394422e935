//! Output formatting for extraction results.
//!
//! Supports table and JSON listings of exports, plus run summaries.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::{ExportSummary, ExtractionFailure, ExtractionReport};
use crate::infrastructure::ProfilePaths;

/// Output format options for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact table listing.
    #[default]
    Table,
    /// JSON format for programmatic use.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Use: table, json")),
        }
    }
}

/// Formats export summaries as JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_exports_json(exports: &[ExportSummary]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(exports)
}

/// Formats a table listing of export summaries.
pub fn format_exports_table(exports: &[ExportSummary]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["File", "Name", "Id", "Lines", "Bytes", "Other sources", "Modified"]);

    for export in exports {
        let modified = export.modified.map_or_else(
            || "-".to_string(),
            |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
        );

        let other = if export.other_sources.is_empty() {
            "-".to_string()
        } else {
            export.other_sources.join(", ")
        };

        table.add_row(vec![
            truncate(&export.file_name, 40),
            truncate(export.display_name(), 30),
            export.id.as_deref().map_or_else(|| "-".to_string(), |id| truncate(id, 20)),
            export.main_lines.to_string(),
            export.main_bytes.to_string(),
            other,
            modified,
        ]);
    }

    table.to_string()
}

/// Formats a table of profiles with their derived directories.
pub fn format_profiles_table(profiles: &[ProfilePaths]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Profile", "Exports", "Sources"]);

    for profile in profiles {
        table.add_row(vec![
            profile.name.clone(),
            profile.input.display().to_string(),
            profile.output.display().to_string(),
        ]);
    }

    table.to_string()
}

/// Formats the summary line of an extraction run.
pub fn format_report(report: &ExtractionReport) -> String {
    let verb = if report.dry_run {
        "Would extract"
    } else {
        "Extracted"
    };

    let mut out = format!(
        "{} {} {} of {} export(s) ({} bytes)",
        if report.is_clean() {
            "✓".green().bold()
        } else {
            "!".yellow().bold()
        },
        verb,
        report.extracted.len().to_string().cyan(),
        report.matched,
        report.total_bytes()
    );

    if !report.failures.is_empty() {
        out.push('\n');
        out.push_str(&format_failures(&report.failures));
    }

    out
}

/// Formats skipped exports, one per line.
pub fn format_failures(failures: &[ExtractionFailure]) -> String {
    let mut out = format!("{} {} export(s) skipped:", "✗".red().bold(), failures.len());
    for failure in failures {
        out.push_str(&format!("\n  {} {}", "-".red(), failure.reason));
    }
    out
}

/// Truncates a string to max length (in characters) with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    let s = s.lines().next().unwrap_or(s);
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExtractedSource;
    use std::path::PathBuf;

    fn summary() -> ExportSummary {
        ExportSummary {
            file_name: "Magma Tunnels.epe".into(),
            name: Some("Magma Tunnels".into()),
            id: Some("WbnpwEaE2P7yc9wqc".into()),
            main_lines: 120,
            main_bytes: 3456,
            other_sources: vec!["lib".into()],
            modified: None,
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world!", 8), "hello...");
        assert_eq!(truncate("ünïcödé strïng", 6), "ünï...");
        assert_eq!(truncate("first\nsecond", 20), "first");
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TABLE".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert!("markdown".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_exports_table_contains_fields() {
        let table = format_exports_table(&[summary()]);
        assert!(table.contains("Magma Tunnels.epe"));
        assert!(table.contains("3456"));
        assert!(table.contains("lib"));
    }

    #[test]
    fn test_exports_json() {
        let json = format_exports_json(&[summary()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["file_name"], "Magma Tunnels.epe");
        assert_eq!(value[0]["main_lines"], 120);
    }

    #[test]
    fn test_report_lists_failures() {
        colored::control::set_override(false);
        let report = ExtractionReport {
            matched: 2,
            extracted: vec![ExtractedSource {
                input: PathBuf::from("a.epe"),
                output: PathBuf::from("a.js"),
                bytes: 4,
            }],
            failures: vec![ExtractionFailure {
                input: PathBuf::from("b.epe"),
                reason: "Malformed export b.epe: missing field `main`".into(),
            }],
            dry_run: false,
        };

        let text = format_report(&report);
        assert!(text.contains("Extracted 1 of 2 export(s) (4 bytes)"));
        assert!(text.contains("1 export(s) skipped"));
        assert!(text.contains("missing field `main`"));
    }
}
