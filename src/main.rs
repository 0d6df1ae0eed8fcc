//! CLI entry point for ratbag-devicedb
//!
//! Provides command-line interface for validating device files,
//! checking the database for duplicate and receiver match entries,
//! and listing the devices it describes.

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::*;
use ratbag_devicedb::core::ReceiverDenylist;
use ratbag_devicedb::database::{
    CorpusReport, DeviceDatabase, FileValidator, MatchScan, ValidationReport,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ratbag-devicedb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// When to colour output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate device files against the schema
    Validate {
        /// Device files or directories of device files
        #[arg(env = "RATBAG_DEVICE_DIR", default_value = "data/devices")]
        paths: Vec<PathBuf>,
    },

    /// Check for DeviceMatch entries listed in more than one file
    CheckDuplicates {
        /// Path to the device directory
        #[arg(env = "RATBAG_DEVICE_DIR", default_value = "data/devices")]
        directory: PathBuf,
    },

    /// Check for wireless receiver IDs listed as devices
    CheckReceivers {
        /// Path to the device directory
        #[arg(env = "RATBAG_DEVICE_DIR", default_value = "data/devices")]
        directory: PathBuf,
    },

    /// Run validation, duplicate and receiver checks
    CheckAll {
        /// Path to the device directory
        #[arg(env = "RATBAG_DEVICE_DIR", default_value = "data/devices")]
        directory: PathBuf,
    },

    /// List all devices in the database
    List {
        /// Path to the device directory
        #[arg(env = "RATBAG_DEVICE_DIR", default_value = "data/devices")]
        directory: PathBuf,
    },
}

/// Combined report printed by `check-all --json`
#[derive(Serialize)]
struct FullReport<'a> {
    validation: &'a ValidationReport,
    corpus: &'a CorpusReport,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ratbag_devicedb={}", log_level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    let exit_code = match &cli.command {
        Commands::Validate { paths } => validate(paths, cli.json)?,
        Commands::CheckDuplicates { directory } => check_duplicates(directory, cli.json)?,
        Commands::CheckReceivers { directory } => check_receivers(directory, cli.json)?,
        Commands::CheckAll { directory } => check_all(directory, cli.json)?,
        Commands::List { directory } => list_devices(directory, cli.json)?,
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

/// Expand a leading tilde in a user supplied path
fn expand_path(path: &Path) -> anyhow::Result<PathBuf> {
    let expanded = shellexpand::tilde(
        path.to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    );
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Open the device directory and list its files
fn device_files(directory: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let dir = expand_path(directory)?;
    let database = DeviceDatabase::open(dir)?;
    info!("Reading device files from {}", database.dir().display());
    Ok(database.device_files()?)
}

/// Resolve command line paths into a flat list of device files
///
/// Directories contribute every `*.device` file inside them; plain files
/// are taken as given.
fn collect_paths(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        let path = expand_path(path)?;
        if path.is_dir() {
            files.extend(device_files(&path)?);
        } else if path.exists() {
            files.push(path);
        } else {
            anyhow::bail!("No such file or directory: {}", path.display());
        }
    }

    Ok(files)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialise report")?;
    println!("{}", json);
    Ok(())
}

/// Validate device files and print one line per violation
fn validate(paths: &[PathBuf], json: bool) -> anyhow::Result<i32> {
    let files = collect_paths(paths)?;
    let report = FileValidator::new().validate_paths(&files);

    if json {
        print_json(&report)?;
    } else {
        print_validation(&report);
    }

    Ok(report.exit_code())
}

fn print_validation(report: &ValidationReport) {
    for file in &report.files {
        println!("{} Parsing file {}", "→".cyan(), file.path.display());
        if let Some(error) = &file.error {
            println!("  {} {}", "✗".red().bold(), error);
        }
    }

    let failed = report.failures().count();
    if failed == 0 {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            format!("All {} files passed", report.files.len()).bold()
        );
    } else {
        println!(
            "\n{} {} of {} file{} failed validation",
            "✗".red().bold(),
            failed,
            report.files.len(),
            if report.files.len() == 1 { "" } else { "s" }
        );
    }
}

/// Check the directory for duplicate DeviceMatch entries
fn check_duplicates(directory: &Path, json: bool) -> anyhow::Result<i32> {
    let scan = MatchScan::collect(&device_files(directory)?);
    let report = CorpusReport::duplicates(&scan);

    if json {
        print_json(&report)?;
    } else {
        print_corpus(&report);
    }

    Ok(report.exit_code())
}

/// Check the directory for receiver IDs
fn check_receivers(directory: &Path, json: bool) -> anyhow::Result<i32> {
    let scan = MatchScan::collect(&device_files(directory)?);
    let report = CorpusReport::receivers(&scan, &ReceiverDenylist::new());

    if json {
        print_json(&report)?;
    } else {
        print_corpus(&report);
    }

    Ok(report.exit_code())
}

/// Run every check over the directory
fn check_all(directory: &Path, json: bool) -> anyhow::Result<i32> {
    let files = device_files(directory)?;
    let validation = FileValidator::new().validate_paths(&files);
    let corpus = CorpusReport::full(&MatchScan::collect(&files), &ReceiverDenylist::new());

    if json {
        print_json(&FullReport {
            validation: &validation,
            corpus: &corpus,
        })?;
    } else {
        print_validation(&validation);
        println!();
        print_corpus(&corpus);
    }

    Ok(validation.exit_code().max(corpus.exit_code()))
}

fn print_corpus(report: &CorpusReport) {
    for skipped in &report.skipped {
        println!(
            "{} Skipped {}: {}",
            "⚠".yellow(),
            skipped.file,
            skipped.reason.dimmed()
        );
    }

    for duplicate in &report.duplicates {
        println!(
            "{} Duplicate DeviceMatch={} in {} and {}",
            "✗".red().bold(),
            duplicate.entry.cyan(),
            duplicate.second_file,
            duplicate.first_file
        );
    }

    for hit in &report.receivers {
        println!("{} {}", "✗".red().bold(), hit);
        info!("{} is the {}", hit.entry, hit.receiver);
    }

    if !report.has_failures() {
        println!("{} {}", "✓".green().bold(), "No conflicting match entries".bold());
    }
}

/// List all devices in the directory
fn list_devices(directory: &Path, json: bool) -> anyhow::Result<i32> {
    let scan = MatchScan::collect(&device_files(directory)?);

    if json {
        print_json(&scan)?;
        return Ok(0);
    }

    for record in &scan.records {
        let name = record.name.as_deref().unwrap_or("<unnamed>");
        let driver = record.driver.as_deref().unwrap_or("<none>");

        println!(
            "{} → {} {}",
            name.cyan().bold(),
            driver.green(),
            record.device_match.dimmed()
        );
    }

    println!("\nTotal: {} devices", scan.records.len());

    Ok(0)
}
