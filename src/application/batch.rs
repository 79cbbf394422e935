//! Whole-backup extraction.
//!
//! Runs the extractor over every profile found under a backups root.

use std::path::Path;

use crate::domain::{AppError, ExtractionJob, ExtractionReport, Result};
use crate::infrastructure::{list_profiles, ProfilePaths};

use super::extractor::{extract_exports_with, ExtractOptions};

/// Progress notification for a batch run.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// A profile is about to be processed.
    Profile(&'a ProfilePaths),
    /// An export inside the current profile is about to be processed.
    Export(&'a ExtractionJob),
}

/// Result of extracting a single profile.
#[derive(Debug)]
pub struct ProfileReport {
    pub profile: ProfilePaths,
    pub report: ExtractionReport,
}

/// Extracts every profile under `root`, in name order.
///
/// When `create_output` is set, a missing `src` directory is created
/// before the profile is processed.
///
/// # Errors
/// Returns error if the root cannot be listed, an output directory cannot
/// be created, or a profile fails under the `Abort` policy.
pub fn extract_all_profiles<F>(
    root: &Path,
    options: &ExtractOptions,
    create_output: bool,
    mut on_event: F,
) -> Result<Vec<ProfileReport>>
where
    F: FnMut(BatchEvent<'_>),
{
    let profiles = list_profiles(root)?;
    tracing::info!("Found {} profile(s) in {}", profiles.len(), root.display());

    let mut reports = Vec::with_capacity(profiles.len());

    for profile in profiles {
        on_event(BatchEvent::Profile(&profile));

        if create_output && !options.dry_run && !profile.output.exists() {
            std::fs::create_dir_all(&profile.output).map_err(|e| {
                AppError::io(
                    format!("Failed to create directory {}", profile.output.display()),
                    e,
                )
            })?;
            tracing::debug!("Created {}", profile.output.display());
        }

        let report = extract_exports_with(&profile.input, &profile.output, options, |job| {
            on_event(BatchEvent::Export(job));
        })?;

        reports.push(ProfileReport { profile, report });
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FailurePolicy;
    use std::fs;
    use tempfile::tempdir;

    fn write_export(dir: &Path, name: &str, main: &str) {
        let body = serde_json::json!({ "sources": { "main": main } }).to_string();
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_extracts_every_profile() {
        let root = tempdir().unwrap();
        let heart = root.path().join("HEART").join("epe");
        let fan = root.path().join("FAN").join("epe");
        fs::create_dir_all(&heart).unwrap();
        fs::create_dir_all(&fan).unwrap();
        write_export(&heart, "pulse.epe", "pulse()");
        write_export(&fan, "spiral.epe", "spiral()");

        let mut profiles_seen = Vec::new();
        let mut exports_seen = 0;
        let reports = extract_all_profiles(root.path(), &ExtractOptions::default(), true, |event| {
            match event {
                BatchEvent::Profile(p) => profiles_seen.push(p.name.clone()),
                BatchEvent::Export(_) => exports_seen += 1,
            }
        })
        .unwrap();

        assert_eq!(profiles_seen, vec!["FAN", "HEART"]);
        assert_eq!(exports_seen, 2);
        assert_eq!(reports.len(), 2);
        assert_eq!(
            fs::read_to_string(root.path().join("HEART/src/pulse.js")).unwrap(),
            "pulse()"
        );
        assert_eq!(
            fs::read_to_string(root.path().join("FAN/src/spiral.js")).unwrap(),
            "spiral()"
        );
    }

    #[test]
    fn test_missing_output_without_create_is_error() {
        let root = tempdir().unwrap();
        let input = root.path().join("CROWN").join("epe");
        fs::create_dir_all(&input).unwrap();
        write_export(&input, "a.epe", "a");

        let result = extract_all_profiles(root.path(), &ExtractOptions::default(), false, |_| {});

        assert!(matches!(result, Err(AppError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_dry_run_previews_profile_without_src() {
        let root = tempdir().unwrap();
        let input = root.path().join("CROWN").join("epe");
        fs::create_dir_all(&input).unwrap();
        write_export(&input, "a.epe", "a");

        let options = ExtractOptions {
            dry_run: true,
            ..Default::default()
        };
        let reports = extract_all_profiles(root.path(), &options, true, |_| {}).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].report.extracted.len(), 1);
        assert!(!root.path().join("CROWN").join("src").exists());
    }

    #[test]
    fn test_skip_policy_continues_across_profiles() {
        let root = tempdir().unwrap();
        let a = root.path().join("A").join("epe");
        let b = root.path().join("B").join("epe");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::write(a.join("bad.epe"), "{}").unwrap();
        write_export(&b, "good.epe", "ok");

        let options = ExtractOptions {
            on_error: FailurePolicy::Skip,
            ..Default::default()
        };
        let reports = extract_all_profiles(root.path(), &options, true, |_| {}).unwrap();

        assert_eq!(reports[0].report.failures.len(), 1);
        assert_eq!(reports[1].report.extracted.len(), 1);
    }
}
