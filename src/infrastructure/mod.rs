//! Infrastructure layer - external adapters (filesystem, config files).
//!
//! This layer handles all I/O operations.

pub mod config;
pub mod export_files;
pub mod profile_paths;

pub use config::{ensure_config_exists, load_config};
pub use export_files::{list_exports, modified_time, read_export, require_dir, write_source};
pub use profile_paths::{backups_root, list_profiles, profile_paths, ProfilePaths};
