//! epe-extract - Extract program sources from LED controller project exports.
//!
//! An `.epe` export is a JSON bundle holding a pattern's sources plus
//! metadata. This tool writes the `sources.main` text of every export in a
//! directory to a matching `.js` file.
//!
//!   epe-extract extract <epe-dir> <src-dir>   # explicit directories
//!   epe-extract profile <name>                # <backups>/<name>/epe -> src
//!   epe-extract all                           # every profile
//!   epe-extract list <epe-dir>                # inspect without writing

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    extract_all_profiles, extract_exports_with, format_exports_json, format_exports_table,
    format_failures, format_profiles_table, format_report, inspect_exports, BatchEvent,
    ExtractOptions, OutputFormat,
};
use cli::{Cli, Commands, RunArgs};
use domain::{AppConfig, ExtractionJob, FailurePolicy};
use infrastructure::{backups_root, ensure_config_exists, list_profiles, load_config, profile_paths};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Usage errors go to stdout with a non-zero status.
        Err(e) if e.use_stderr() => {
            print!("{}", e.render());
            std::process::exit(e.exit_code());
        }
        Err(e) => e.exit(),
    };

    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  {} {}", "Caused by:".dimmed(), cause);
            source = cause.source();
        }

        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli) -> domain::Result<()> {
    if matches!(cli.command, Commands::Init) {
        return cmd_init(cli.config.as_deref());
    }

    let config = load_config(cli.config.as_deref())?;
    let defaults = ExtractOptions::from_config(&config.extract);

    match cli.command {
        Commands::Extract {
            input_directory,
            output_directory,
            name,
            run: args,
        } => {
            if let Some(name) = name {
                tracing::debug!("Ignoring name argument: {}", name);
            }
            cmd_extract(&input_directory, &output_directory, &args.apply(defaults))?;
        }
        Commands::Profile {
            name,
            backups_dir,
            run: args,
        } => {
            let root = resolve_root(backups_dir, &config)?;
            let paths = profile_paths(&root, &name)?;
            cmd_extract(&paths.input, &paths.output, &args.apply(defaults))?;
        }
        Commands::All {
            backups_dir,
            run: args,
        } => {
            let root = resolve_root(backups_dir, &config)?;
            cmd_all(&root, &args.apply(defaults), config.batch.create_output)?;
        }
        Commands::List {
            input_directory,
            format,
            on_error,
            sort,
        } => {
            let args = RunArgs {
                on_error,
                sort,
                dry_run: true,
            };
            cmd_list(&input_directory, &args.apply(defaults), format)?;
        }
        Commands::Profiles { backups_dir } => {
            let root = resolve_root(backups_dir, &config)?;
            cmd_profiles(&root)?;
        }
        Commands::Init => {}
    }

    Ok(())
}

/// Backups root from the flag, the config file, or the tool's location.
fn resolve_root(flag: Option<PathBuf>, config: &AppConfig) -> domain::Result<PathBuf> {
    let configured = flag.or_else(|| config.paths.backups_dir.clone());
    backups_root(configured.as_deref())
}

fn print_progress(job: &ExtractionJob) {
    println!(
        "Extracting source from {} -> {}",
        job.input_name(),
        job.output_name()
    );
}

/// Extract one directory into another.
fn cmd_extract(input: &Path, output: &Path, options: &ExtractOptions) -> domain::Result<()> {
    tracing::info!(
        "Extracting {} -> {} (on error: {})",
        input.display(),
        output.display(),
        options.on_error
    );

    let report = extract_exports_with(input, output, options, print_progress)?;

    println!();
    println!("{}", format_report(&report));

    Ok(())
}

/// Extract every profile under the backups root.
fn cmd_all(root: &Path, options: &ExtractOptions, create_output: bool) -> domain::Result<()> {
    let reports = extract_all_profiles(root, options, create_output, |event| match event {
        BatchEvent::Profile(profile) => {
            println!();
            println!("{} {}", "📁".bold(), profile.name.cyan().bold());
        }
        BatchEvent::Export(job) => print_progress(job),
    })?;

    println!();
    for entry in &reports {
        println!("{}: {}", entry.profile.name.cyan(), format_report(&entry.report));
    }

    let extracted: usize = reports.iter().map(|r| r.report.extracted.len()).sum();
    println!(
        "\n{} {} source(s) from {} profile(s) under {}",
        "✓".green().bold(),
        extracted,
        reports.len(),
        root.display()
    );

    Ok(())
}

/// List exports in a directory.
fn cmd_list(input: &Path, options: &ExtractOptions, format: OutputFormat) -> domain::Result<()> {
    let (summaries, failures) = inspect_exports(input, options)?;

    let output = match format {
        OutputFormat::Table => format_exports_table(&summaries),
        OutputFormat::Json => {
            format_exports_json(&summaries).map_err(domain::AppError::json_parse)?
        }
    };
    println!("{output}");

    if !failures.is_empty() {
        eprintln!("{}", format_failures(&failures));
    }

    if format == OutputFormat::Table {
        println!();
        println!("Total: {} export(s) in {}", summaries.len(), input.display());
    }

    Ok(())
}

/// Show profiles under the backups root.
fn cmd_profiles(root: &Path) -> domain::Result<()> {
    let profiles = list_profiles(root)?;

    println!("{}", "📂 Backup Profiles".bold());
    println!("Root: {}", root.display());
    println!();
    println!("{}", format_profiles_table(&profiles));
    println!();
    println!("Total: {} profile(s)", profiles.len());

    Ok(())
}

/// Write the default configuration file.
fn cmd_init(path: Option<&Path>) -> domain::Result<()> {
    let (path, created) = ensure_config_exists(path)?;

    if created {
        println!("{} Created {}", "✓".green().bold(), path.display());
    } else {
        println!("Configuration already exists: {}", path.display());
    }
    println!(
        "Default failure policy: {} (use --on-error {} to continue past bad exports)",
        FailurePolicy::default(),
        FailurePolicy::Skip
    );

    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}
