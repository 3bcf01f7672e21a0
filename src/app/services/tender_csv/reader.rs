//! `;`-delimited CSV reader producing validated rows

use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::column_parser::{Column, ColumnParser, RecordType};
use super::row::{CellValue, ValidatedRow};
use crate::constants::CSV_DELIMITER;
use crate::{Error, Result, ValidationError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Header row of every file
const HEADER_LINE: u64 = 1;

/// Reader for one tender CSV file
///
/// Headers are classified once, so an unknown or missing column fails the
/// whole file at line 1 before any data row is looked at. Every data cell is
/// then validated by its column; the first failure aborts the read with
/// file / line / column attached. Blank lines between records are validated
/// as rows of empty cells.
#[derive(Debug, Clone)]
pub struct TenderCsvReader {
    path: PathBuf,
    parser: ColumnParser,
}

impl TenderCsvReader {
    /// Create a reader for `path` interpreted as `record_type`
    pub fn new(path: impl AsRef<Path>, record_type: RecordType) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let parser = ColumnParser::new(record_type, &path)?;
        Ok(Self { path, parser })
    }

    pub fn parser(&self) -> &ColumnParser {
        &self.parser
    }

    /// Read and validate the whole file
    pub fn read(&self) -> Result<Vec<ValidatedRow>> {
        let content = std::fs::read(&self.path)
            .map_err(|e| Error::io(format!("Failed to read {}", self.path.display()), e))?;
        let rows = self.read_from(strip_bom(&content))?;

        debug!(
            "Read {} {} rows from {}",
            rows.len(),
            self.parser.record_type(),
            self.path.display()
        );
        Ok(rows)
    }

    /// Read and validate CSV content from any reader, attributing errors to
    /// this reader's path
    pub fn read_from<R: Read>(&self, input: R) -> Result<Vec<ValidatedRow>> {
        let source = self.parser.source();
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(CSV_DELIMITER)
            .has_headers(true)
            .from_reader(input);

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::csv_parsing(source, "Failed to read CSV header", Some(e)))?
            .clone();

        let columns = self.classify_headers(headers.iter())?;

        let mut rows = Vec::new();
        let mut next_line = HEADER_LINE + 1;
        for result in csv_reader.records() {
            let record = result
                .map_err(|e| Error::csv_parsing(source, "Failed to read CSV record", Some(e)))?;
            let line = record.position().map_or(next_line, |position| position.line());

            // The csv reader drops blank lines; they still count as rows of
            // empty cells and go through validation at their own line
            for blank_line in next_line..line {
                let blank = std::iter::repeat_n("", columns.len());
                rows.push(self.validate_row(&columns, blank, blank_line)?);
            }

            rows.push(self.validate_row(&columns, record.iter(), line)?);
            next_line = line + 1 + embedded_newlines(&record);
        }

        Ok(rows)
    }

    fn validate_row<'r>(
        &self,
        columns: &[Column],
        values: impl Iterator<Item = &'r str>,
        line: u64,
    ) -> Result<ValidatedRow> {
        let source = self.parser.source();
        let mut cells: Vec<(String, CellValue)> = Vec::with_capacity(columns.len());
        for (column, raw) in columns.iter().zip(values) {
            let value = self
                .parser
                .parse_classified(raw, column)
                .map_err(|e| Error::csv_value(source, line, column.name(), e))?;
            cells.push((column.name().to_string(), value));
        }
        Ok(ValidatedRow::new(source, line, cells))
    }

    fn classify_headers<'a>(&self, names: impl Iterator<Item = &'a str>) -> Result<Vec<Column>> {
        let source = self.parser.source();
        let columns = names
            .map(|name| {
                self.parser
                    .classify(name)
                    .map_err(|e| Error::csv_value(source, HEADER_LINE, name, e))
            })
            .collect::<Result<Vec<_>>>()?;

        self.parser.check_header(&columns).map_err(|e| {
            let column = match &e {
                ValidationError::MissingColumn { column, .. } => column.clone(),
                _ => String::new(),
            };
            Error::csv_value(source, HEADER_LINE, column, e)
        })?;

        Ok(columns)
    }
}

/// Read `path` as `record_type`
pub fn read_csv(path: impl AsRef<Path>, record_type: RecordType) -> Result<Vec<ValidatedRow>> {
    TenderCsvReader::new(path, record_type)?.read()
}

/// Line breaks inside quoted fields, which push the next record further down
fn embedded_newlines(record: &csv::StringRecord) -> u64 {
    record
        .iter()
        .map(|field| field.matches('\n').count() as u64)
        .sum()
}

fn strip_bom(content: &[u8]) -> &[u8] {
    content.strip_prefix(UTF8_BOM).unwrap_or(content)
}
