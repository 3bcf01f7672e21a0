//! Command-line argument definitions for the tender builder
//!
//! This module defines the CLI interface using the clap derive API.

use crate::constants::DEFAULT_OUT_FILE;
use crate::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the tender builder
///
/// Validates a root directory of paper-channel tender CSV files and packages
/// the normalized records into a zip archive for bulk loading.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tender-builder",
    version,
    about = "Validate paper-channel tender CSV files and package them for bulk loading",
    long_about = "Validates a root directory holding one folder per environment (dev, test, uat, \
                  hotfix, prod), each with tender folders named as YYYYMMDD dates. Every CSV file \
                  is checked column by column, mapped into the target table records and written \
                  as newline-delimited JSON into a single zip archive. Any error aborts the whole \
                  build; no archive is produced unless every tender is valid."
)]
pub struct Args {
    /// Root directory of the tender tree
    ///
    /// Must contain the dev, test, uat, hotfix and prod directories.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Root directory of the tender tree",
        conflicts_with = "root"
    )]
    pub path: Option<PathBuf>,

    /// Root directory given positionally, same as --path
    #[arg(
        value_name = "DIR",
        required_unless_present = "path",
        help = "Root directory of the tender tree (same as --path)"
    )]
    pub root: Option<PathBuf>,

    /// Output zip archive
    ///
    /// The parent directory must exist. An existing file is overwritten.
    #[arg(
        short = 'o',
        long = "out-file",
        visible_alias = "outFile",
        value_name = "ZIP",
        default_value = DEFAULT_OUT_FILE,
        help = "Output zip archive"
    )]
    pub out_file: PathBuf,

    /// Validate and map every tender without writing any output
    #[arg(
        long = "dry-run",
        help = "Validate and map every tender without writing any output"
    )]
    pub dry_run: bool,

    /// Write plain JSON records instead of DynamoDB attribute-value JSON
    #[arg(
        long = "plain-json",
        help = "Write plain JSON records instead of DynamoDB attribute-value JSON"
    )]
    pub plain_json: bool,

    /// Keep the staging tree in this directory
    ///
    /// By default the per-environment JSON files are staged in a temporary
    /// directory that is removed once the archive is written.
    #[arg(
        long = "keep-staging",
        value_name = "DIR",
        help = "Write the staging tree to DIR and keep it after archiving"
    )]
    pub keep_staging: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// The root directory, from `--path` or the positional argument
    pub fn root_path(&self) -> Result<PathBuf> {
        self.path
            .clone()
            .or_else(|| self.root.clone())
            .ok_or_else(|| Error::configuration("A root directory is required (--path <DIR>)"))
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
