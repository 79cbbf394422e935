//! Filesystem access for export and source files.
//!
//! Every handle opened here is dropped before the function returns.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::{AppError, Result};

/// Checks that `path` exists and is a directory.
///
/// # Errors
/// Returns `DirectoryNotFound` otherwise.
pub fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(AppError::DirectoryNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Lists regular files directly inside `dir` whose names end with
/// `.{extension}` (case-sensitive).
///
/// Entries come back in the order the filesystem lists them.
///
/// # Errors
/// Returns error if the directory is missing or cannot be read.
pub fn list_exports(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    require_dir(dir)?;

    let suffix = format!(".{extension}");
    let entries = fs::read_dir(dir)
        .map_err(|e| AppError::io(format!("Failed to read directory {}", dir.display()), e))?;

    let mut exports = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| AppError::io(format!("Failed to read directory {}", dir.display()), e))?;
        let path = entry.path();

        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::debug!("Skipping non UTF-8 file name: {}", path.display());
            continue;
        };
        if !name.ends_with(&suffix) {
            continue;
        }
        if !path.is_file() {
            tracing::debug!("Skipping non-file entry: {}", path.display());
            continue;
        }

        exports.push(path);
    }

    Ok(exports)
}

/// Reads a whole export file.
///
/// # Errors
/// Returns error if the file cannot be opened or read.
pub fn read_export(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open {}", path.display()), e))?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|e| AppError::io(format!("Failed to read {}", path.display()), e))?;
    Ok(data)
}

/// Writes source text verbatim, replacing any existing file.
///
/// # Errors
/// Returns error if the file cannot be created or written.
pub fn write_source(path: &Path, text: &str) -> Result<()> {
    let mut file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create {}", path.display()), e))?;
    file.write_all(text.as_bytes())
        .map_err(|e| AppError::io(format!("Failed to write {}", path.display()), e))?;
    file.flush()
        .map_err(|e| AppError::io(format!("Failed to write {}", path.display()), e))?;
    Ok(())
}

/// Last modification time of a file, if the platform reports one.
#[must_use]
pub fn modified_time(path: &Path) -> Option<DateTime<Utc>> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Utc>::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = paths
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_list_exports_filters_by_extension() {
        let dir = tempdir().unwrap();
        for name in ["a.epe", "b.txt", "c.json", "d.EPE", "e.epe.bak", "f.epe"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(dir.path().join("nested.epe")).unwrap();

        let found = list_exports(dir.path(), "epe").unwrap();
        assert_eq!(names(&found), vec!["a.epe", "f.epe"]);
    }

    #[test]
    fn test_list_exports_is_not_recursive() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("inner.epe"), "{}").unwrap();

        assert!(list_exports(dir.path(), "epe").unwrap().is_empty());
    }

    #[test]
    fn test_list_exports_missing_dir() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            list_exports(&missing, "epe"),
            Err(AppError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_write_source_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.js");
        write_source(&path, "a much longer first version").unwrap();
        write_source(&path, "short").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn test_read_export_roundtrip_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x.epe");
        fs::write(&path, b"\xEF\xBB\xBF{}").unwrap();
        assert_eq!(read_export(&path).unwrap(), b"\xEF\xBB\xBF{}");
        assert!(modified_time(&path).is_some());
    }
}
