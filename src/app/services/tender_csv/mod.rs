//! Validating reader for tender CSV files
//!
//! Every file of a tender directory goes through the same pipeline:
//! - [`field_validators`] - single-cell validators and coercions
//! - [`column_parser`] - per record type column tables, range columns and
//!   versioned file rules
//! - [`reader`] - `;`-delimited reading with file / line / column context
//! - [`row`] - the typed rows handed to the record mappers
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tender_builder::app::services::tender_csv::{RecordType, read_csv};
//!
//! # fn example() -> tender_builder::Result<()> {
//! let rows = read_csv("dev/20240101/TenderCosts.csv", RecordType::TenderCosts)?;
//! for row in &rows {
//!     println!("{} -> {}", row.text("product")?, row.float("dematerializationCost")?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod column_parser;
pub mod field_validators;
pub mod reader;
pub mod row;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_parser::{
    Column, ColumnParser, ColumnSpec, FieldKind, RangeColumn, RecordType, parse_range_column,
};
pub use field_validators::{ValidationResult, format_utc};
pub use reader::{TenderCsvReader, read_csv};
pub use row::{CellValue, ValidatedRow};
