//! Command-line interface components.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

use crate::{OdfConfig, OdfHeader, OdfVersion};

#[derive(Parser, Debug)]
#[command(name = "odf-tool")]
#[command(about = "Inspect, validate and convert Ocean Data Format (ODF) files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a summary of an ODF file
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Read, reconcile and rewrite an ODF file
    Convert {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Output dialect (2 or 3); defaults to the input's
        #[arg(long, value_name = "VERSION")]
        odf_version: Option<OdfVersion>,

        /// Skip write-time invariant checks
        #[arg(long)]
        no_validate: bool,
    },

    /// Check an ODF file against the write-time invariants without writing
    Validate {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

/// Install the tracing subscriber; `RUST_LOG` overrides the flag-derived level
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("odf_toolbox={}", args.get_log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Run the selected command; `Ok(false)` means the file failed validation
pub fn run(args: Args) -> Result<bool> {
    match args.command {
        Command::Inspect { file } => {
            let odf = read(&file, OdfConfig::default())?;
            print_summary(&file, &odf);
            Ok(true)
        }
        Command::Convert {
            input,
            output,
            odf_version,
            no_validate,
        } => {
            let config = if no_validate {
                OdfConfig::default().without_write_validation()
            } else {
                OdfConfig::default()
            };
            let mut odf = read(&input, config)?;
            let version = odf_version.unwrap_or_else(|| odf.version());

            odf.write(&output, version)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            report_warnings(&odf);
            println!(
                "{} {} -> {} (ODF {})",
                "Converted".bright_green().bold(),
                input.display(),
                output.display(),
                version
            );
            Ok(true)
        }
        Command::Validate { file } => {
            let mut odf = read(&file, OdfConfig::default())?;
            odf.update_odf();
            report_warnings(&odf);

            match odf.validate() {
                Ok(()) => {
                    println!("{} {}", "Valid".bright_green().bold(), file.display());
                    Ok(true)
                }
                Err(error) => {
                    println!("{} {}: {}", "Invalid".bright_red().bold(), file.display(), error);
                    Ok(false)
                }
            }
        }
    }
}

fn read(path: &Path, config: OdfConfig) -> Result<OdfHeader> {
    OdfHeader::read_with_config(path, config)
        .with_context(|| format!("Failed to read {}", path.display()))
}

fn print_summary(path: &Path, odf: &OdfHeader) {
    println!("{}", path.display().to_string().bright_cyan().bold());
    println!("  {:<20} {}", "File specification:", odf.file_specification);
    println!("  {:<20} {}", "ODF version:", odf.version());
    println!(
        "  {:<20} {}",
        "Cruise:",
        odf.cruise_header.cruise_number.bright_white()
    );
    println!(
        "  {:<20} {} {}",
        "Event:",
        odf.event_header.data_type,
        odf.event_header.event_number
    );

    let (general, polynomial) = odf.calibration_counts();
    println!(
        "  {:<20} {} general, {} polynomial, {} compass",
        "Calibrations:",
        general,
        polynomial,
        odf.compass_cal_headers.len()
    );
    println!("  {:<20} {}", "History sessions:", odf.history_headers.len());
    println!("  {:<20} {}", "Data rows:", odf.data.len());

    println!("  {}", "Parameters:".bright_white());
    for parameter in &odf.parameter_headers {
        println!(
            "    {} {} ({}) [{}]",
            parameter.code.bright_yellow(),
            parameter.name,
            parameter.units,
            parameter.parameter_type
        );
    }

    report_warnings(odf);
}

fn report_warnings(odf: &OdfHeader) {
    for warning in odf.warnings() {
        println!("  {} {}", "warning:".yellow().bold(), warning);
    }
}
