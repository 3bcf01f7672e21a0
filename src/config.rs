//! Configuration management and validation.
//!
//! The configuration is built once from the command-line arguments and
//! passed by reference into the build pipeline.

use crate::app::services::bundle_writer::RecordFormat;
use crate::cli::args::Args;
use crate::constants::DEFAULT_OUT_FILE;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings of one build run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root directory holding one directory per environment
    pub input_root: PathBuf,

    /// Zip archive produced by the build
    pub out_file: PathBuf,

    /// Directory receiving the staging tree; a temporary directory when `None`
    pub staging_dir: Option<PathBuf>,

    /// Shape of the output records
    pub record_format: RecordFormat,

    /// Validate and map without writing anything
    pub dry_run: bool,

    /// Show progress bars and the final report
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("."),
            out_file: PathBuf::from(DEFAULT_OUT_FILE),
            staging_dir: None,
            record_format: RecordFormat::AttributeValue,
            dry_run: false,
            show_progress: true,
        }
    }
}

impl Config {
    /// Build the configuration from parsed command-line arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        Ok(Self {
            input_root: args.root_path()?,
            out_file: args.out_file.clone(),
            staging_dir: args.keep_staging.clone(),
            record_format: if args.plain_json {
                RecordFormat::Plain
            } else {
                RecordFormat::AttributeValue
            },
            dry_run: args.dry_run,
            show_progress: args.show_progress(),
        })
    }

    /// Create configuration for a root directory with default settings
    pub fn for_root(input_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            ..Self::default()
        }
    }

    /// Set the output archive
    pub fn with_out_file(mut self, out_file: impl Into<PathBuf>) -> Self {
        self.out_file = out_file.into();
        self
    }

    /// Keep the staging tree in `staging_dir`
    pub fn with_staging_dir(mut self, staging_dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(staging_dir.into());
        self
    }

    /// Set the output record format
    pub fn with_record_format(mut self, record_format: RecordFormat) -> Self {
        self.record_format = record_format;
        self
    }

    /// Enable dry run mode
    pub fn with_dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Disable progress bars and the final report
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Check the paths before any tender is read
    ///
    /// Output checks are skipped in dry run mode since nothing is written.
    pub fn validate(&self) -> Result<()> {
        if !self.input_root.exists() {
            return Err(Error::configuration(format!(
                "Input path does not exist: {}",
                self.input_root.display()
            )));
        }

        if !self.input_root.is_dir() {
            return Err(Error::configuration(format!(
                "Input path is not a directory: {}",
                self.input_root.display()
            )));
        }

        if self.dry_run {
            return Ok(());
        }

        if self
            .out_file
            .extension()
            .is_none_or(|extension| !extension.eq_ignore_ascii_case("zip"))
        {
            return Err(Error::configuration(format!(
                "Output file must have a .zip extension: {}",
                self.out_file.display()
            )));
        }

        if self.out_file.is_dir() {
            return Err(Error::configuration(format!(
                "Output file is a directory: {}",
                self.out_file.display()
            )));
        }

        let parent = output_parent(&self.out_file);
        if !parent.is_dir() {
            return Err(Error::configuration(format!(
                "Output directory does not exist: {}",
                parent.display()
            )));
        }

        if let Some(staging_dir) = &self.staging_dir {
            if staging_dir.exists() && !staging_dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Staging path is not a directory: {}",
                    staging_dir.display()
                )));
            }
            if staging_dir.is_dir() && !is_empty_dir(staging_dir)? {
                return Err(Error::configuration(format!(
                    "Staging directory is not empty: {}",
                    staging_dir.display()
                )));
            }
            if self.out_file.starts_with(staging_dir) {
                return Err(Error::configuration(format!(
                    "Output file {} must not be inside the staging directory",
                    self.out_file.display()
                )));
            }
        }

        Ok(())
    }
}

/// Whether `dir` has no entries; leftovers would end up in the archive
fn is_empty_dir(dir: &Path) -> Result<bool> {
    let mut entries = std::fs::read_dir(dir)
        .map_err(|e| Error::io(format!("Failed to read {}", dir.display()), e))?;
    Ok(entries.next().is_none())
}

/// Parent directory of `path`, the current directory for bare file names
fn output_parent(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
