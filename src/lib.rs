//! Tender Builder Library
//!
//! A Rust library for turning a directory tree of paper-channel tender CSV
//! files into validated, normalized records packaged per environment for
//! bulk loading into a document store.
//!
//! This library provides tools for:
//! - Validating the environment / tender directory layout and versioned file families
//! - Reading `;`-delimited CSV files through per-record-type column parsers
//! - Coercing and validating every cell (UTC timestamps, decimal-comma floats, enums)
//! - Mapping validated rows into keyed output records
//! - Detecting overlapping capacity validity intervals
//! - Writing newline-delimited JSON bundles and archiving them into a zip file

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod bundle_writer;
        pub mod capacity_intervals;
        pub mod record_mapper;
        pub mod tender_builder;
        pub mod tender_csv;
        pub mod tender_structure;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{TenderBundle, TenderFiles};
pub use config::Config;

/// Result type alias for the tender builder
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single field validator or column parser.
///
/// Carries no location; the CSV reader wraps it into [`Error::CsvValue`]
/// together with file, line and column.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Column name not recognized for the record type of the file
    #[error("Invalid column {column} in file {file}")]
    InvalidColumn { column: String, file: String },

    /// Range column whose bounds are not strictly increasing
    #[error("Invalid column {column} in file {file}: minWeight must be < maxWeight")]
    InvalidRange { column: String, file: String },

    /// Mandatory column absent from the header
    #[error("Missing column {column} in file {file}")]
    MissingColumn { column: String, file: String },

    /// Cell value rejected by its validator
    #[error("{message}")]
    InvalidValue { message: String },
}

impl ValidationError {
    /// Create an invalid value error
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue {
            message: message.into(),
        }
    }

    /// Create an invalid column error
    pub fn invalid_column(column: impl Into<String>, file: impl Into<String>) -> Self {
        Self::InvalidColumn {
            column: column.into(),
            file: file.into(),
        }
    }

    /// True for errors about the column itself rather than the cell value
    pub fn is_column_error(&self) -> bool {
        !matches!(self, Self::InvalidValue { .. })
    }
}

/// Comprehensive error types for tender building operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error (malformed file, unequal record lengths, bad UTF-8)
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// A cell or header failed validation
    #[error("{source}\n on file {file} line {line} column \"{column}\"")]
    CsvValue {
        file: String,
        line: u64,
        column: String,
        source: ValidationError,
    },

    /// Directory layout error: missing directory or file, untracked file,
    /// broken version sequence
    #[error("{message}")]
    Structure { message: String },

    /// Two capacity intervals of the same group overlap or nest
    #[error(
        "Intervals overlap or are nested for geoKey: {geo_key} and unifiedDeliveryDriver: {carrier} for record with activationDateFrom: {from} and activationDateTo: {to}"
    )]
    IntervalConflict {
        geo_key: String,
        carrier: String,
        from: String,
        to: String,
    },

    /// Tender file without exactly one data row
    #[error("{message}")]
    Cardinality { message: String },

    /// JSON serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Zip archive error
    #[error("Archive error: {message}")]
    Archive {
        message: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Attach file / line / column to a validation failure
    pub fn csv_value(
        file: impl Into<String>,
        line: u64,
        column: impl Into<String>,
        source: ValidationError,
    ) -> Self {
        Self::CsvValue {
            file: file.into(),
            line,
            column: column.into(),
            source,
        }
    }

    /// Create a structural error
    pub fn structure(message: impl Into<String>) -> Self {
        Self::Structure {
            message: message.into(),
        }
    }

    /// Create an interval conflict error
    pub fn interval_conflict(
        geo_key: impl Into<String>,
        carrier: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self::IntervalConflict {
            geo_key: geo_key.into(),
            carrier: carrier.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a cardinality error
    pub fn cardinality(message: impl Into<String>) -> Self {
        Self::Cardinality {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create an archive error
    pub fn archive(message: impl Into<String>, source: zip::result::ZipError) -> Self {
        Self::Archive {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// The validation failure behind a [`Error::CsvValue`], if any
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::CsvValue { source, .. } => Some(source),
            _ => None,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(error: zip::result::ZipError) -> Self {
        Self::Archive {
            message: "Zip archive operation failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
