//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::application::{ExtractOptions, OutputFormat};
use crate::domain::FailurePolicy;

/// epe-extract - Extract program sources from LED controller `.epe` exports.
///
/// Quick use: epe-extract extract <epe-dir> <src-dir> | profile <name> | all
#[derive(Parser, Debug)]
#[command(name = "epe-extract")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to the user config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract every export in a directory into another directory.
    Extract {
        /// Directory containing `.epe` export files.
        input_directory: PathBuf,

        /// Existing directory receiving the `.js` source files.
        output_directory: PathBuf,

        /// Ignored; accepted for compatibility with older invocations.
        name: Option<String>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Extract a profile's backups (`<backups>/<name>/epe` into `<backups>/<name>/src`).
    Profile {
        /// Profile name (one directory under the backups root).
        name: String,

        /// Backups root (defaults to the configured one, then the tool's directory).
        #[arg(long)]
        backups_dir: Option<PathBuf>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Extract every profile under the backups root.
    All {
        /// Backups root (defaults to the configured one, then the tool's directory).
        #[arg(long)]
        backups_dir: Option<PathBuf>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// List the exports in a directory without writing anything.
    List {
        /// Directory containing `.epe` export files.
        input_directory: PathBuf,

        /// Output format: table or json.
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,

        /// What to do with an unreadable export: abort or skip.
        #[arg(long)]
        on_error: Option<FailurePolicy>,

        /// List exports in file name order.
        #[arg(long)]
        sort: bool,
    },

    /// Show the profiles found under the backups root.
    Profiles {
        /// Backups root (defaults to the configured one, then the tool's directory).
        #[arg(long)]
        backups_dir: Option<PathBuf>,
    },

    /// Write the default configuration file if it does not exist.
    Init,
}

/// Flags shared by the extracting subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// What to do with an export that cannot be read, parsed or written: abort or skip.
    #[arg(long)]
    pub on_error: Option<FailurePolicy>,

    /// Process exports in file name order instead of directory listing order.
    #[arg(long)]
    pub sort: bool,

    /// Parse every export but write nothing.
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Applies command-line overrides on top of configured options.
    #[must_use]
    pub fn apply(&self, mut options: ExtractOptions) -> ExtractOptions {
        if let Some(policy) = self.on_error {
            options.on_error = policy;
        }
        options.sort |= self.sort;
        options.dry_run = self.dry_run;
        options
    }
}
