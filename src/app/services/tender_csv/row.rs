//! Typed CSV rows produced by the tender CSV reader

use super::column_parser::{RangeColumn, parse_range_column};
use crate::{Error, Result, ValidationError};
use std::fmt;

/// A cell after validation and coercion
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    fn type_name(&self) -> &'static str {
        match self {
            CellValue::Text(_) => "text",
            CellValue::Integer(_) => "integer",
            CellValue::Float(_) => "float",
            CellValue::Bool(_) => "boolean",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(value) => write!(f, "{}", value),
            CellValue::Integer(value) => write!(f, "{}", value),
            CellValue::Float(value) => write!(f, "{}", value),
            CellValue::Bool(value) => write!(f, "{}", value),
        }
    }
}

/// One data line of a CSV file, keyed by header name in column order
///
/// Every column name present was recognized for the file's record type and
/// every value satisfied its column's validator.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRow {
    file: String,
    line: u64,
    cells: Vec<(String, CellValue)>,
}

impl ValidatedRow {
    pub fn new(file: impl Into<String>, line: u64, cells: Vec<(String, CellValue)>) -> Self {
        Self {
            file: file.into(),
            line,
            cells,
        }
    }

    /// Source file of the row
    pub fn file(&self) -> &str {
        &self.file
    }

    /// 1-based line number of the row in its source file
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn cells(&self) -> &[(String, CellValue)] {
        &self.cells
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Required text column
    pub fn text(&self, column: &str) -> Result<&str> {
        match self.require(column)? {
            CellValue::Text(value) => Ok(value),
            other => Err(self.type_mismatch(column, "text", other)),
        }
    }

    /// Text column that may be absent or empty; both read as `None`
    pub fn optional_text(&self, column: &str) -> Result<Option<&str>> {
        match self.get(column) {
            None => Ok(None),
            Some(CellValue::Text(value)) if value.is_empty() => Ok(None),
            Some(CellValue::Text(value)) => Ok(Some(value)),
            Some(other) => Err(self.type_mismatch(column, "text", other)),
        }
    }

    /// Required integer column
    pub fn integer(&self, column: &str) -> Result<i64> {
        match self.require(column)? {
            CellValue::Integer(value) => Ok(*value),
            other => Err(self.type_mismatch(column, "integer", other)),
        }
    }

    /// Required float column
    pub fn float(&self, column: &str) -> Result<f64> {
        match self.require(column)? {
            CellValue::Float(value) => Ok(*value),
            other => Err(self.type_mismatch(column, "float", other)),
        }
    }

    /// Required boolean column
    pub fn boolean(&self, column: &str) -> Result<bool> {
        match self.require(column)? {
            CellValue::Bool(value) => Ok(*value),
            other => Err(self.type_mismatch(column, "boolean", other)),
        }
    }

    /// Weight-range columns of the row with their float cost
    pub fn range_cells(&self) -> Result<Vec<(RangeColumn, f64)>> {
        self.cells
            .iter()
            .filter_map(|(name, value)| parse_range_column(name).map(|range| (range, name, value)))
            .map(|(range, name, value)| match value {
                CellValue::Float(cost) => Ok((range, *cost)),
                other => Err(self.type_mismatch(name, "float", other)),
            })
            .collect()
    }

    fn require(&self, column: &str) -> Result<&CellValue> {
        self.get(column).ok_or_else(|| {
            Error::csv_value(
                &self.file,
                self.line,
                column,
                ValidationError::invalid_value(format!("Column {} is missing", column)),
            )
        })
    }

    fn type_mismatch(&self, column: &str, expected: &str, found: &CellValue) -> Error {
        Error::csv_value(
            &self.file,
            self.line,
            column,
            ValidationError::invalid_value(format!(
                "Column {} holds {} value {} where {} was expected",
                column,
                found.type_name(),
                found,
                expected
            )),
        )
    }
}
