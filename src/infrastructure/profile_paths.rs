//! Backup profile path discovery.
//!
//! Each profile lives under the backups root as `<profile>/epe` (exports)
//! and `<profile>/src` (extracted sources).

use std::path::{Component, Path, PathBuf};

use crate::domain::{AppError, Result};

/// Subdirectory holding a profile's export files.
const EXPORT_DIR: &str = "epe";
/// Subdirectory receiving a profile's extracted sources.
const SOURCE_DIR: &str = "src";
/// Directory next to the executable holding the profiles.
const BACKUPS_DIR: &str = "backups";

/// Input and output directories of one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePaths {
    pub name: String,
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Resolves the backups root: the configured directory, or `backups` inside
/// the directory containing the running executable.
///
/// # Errors
/// Returns error if the executable location cannot be determined.
pub fn backups_root(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = configured {
        return Ok(dir.to_path_buf());
    }

    let exe = std::env::current_exe().map_err(|e| AppError::Config {
        message: format!("Could not determine tool location: {e}"),
    })?;

    let root = exe
        .parent()
        .ok_or_else(|| AppError::Config {
            message: format!("Executable has no parent directory: {}", exe.display()),
        })?
        .join(BACKUPS_DIR);

    tracing::debug!("Using backups root next to executable: {}", root.display());
    Ok(root)
}

/// Derives a profile's input and output directories.
///
/// # Errors
/// Returns error if `name` is not a single plain path component.
pub fn profile_paths(root: &Path, name: &str) -> Result<ProfilePaths> {
    let mut components = Path::new(name).components();
    let valid = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !valid {
        return Err(AppError::Config {
            message: format!("Invalid profile name: {name:?}"),
        });
    }

    let base = root.join(name);
    Ok(ProfilePaths {
        name: name.to_string(),
        input: base.join(EXPORT_DIR),
        output: base.join(SOURCE_DIR),
    })
}

/// Lists profiles under `root` that have an export directory, sorted by name.
///
/// # Errors
/// Returns error if the root is missing or cannot be read.
pub fn list_profiles(root: &Path) -> Result<Vec<ProfilePaths>> {
    if !root.is_dir() {
        return Err(AppError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(root)
        .map_err(|e| AppError::io(format!("Failed to read directory {}", root.display()), e))?;

    let mut profiles = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| AppError::io(format!("Failed to read directory {}", root.display()), e))?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        let paths = profile_paths(root, &name)?;
        if paths.input.is_dir() {
            tracing::debug!("Found profile: {}", name);
            profiles.push(paths);
        }
    }

    profiles.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(profiles)
}
