//! Test helpers for record mappers

use crate::app::services::tender_csv::{CellValue, ValidatedRow};

mod mappers_tests;

pub const TENDER_ACTIVATION: &str = "2024-01-01T00:00:00.000Z";

pub fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

/// Build a validated row as the reader would produce it
pub fn row(cells: Vec<(&str, CellValue)>) -> ValidatedRow {
    ValidatedRow::new(
        "test.csv",
        2,
        cells
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    )
}

pub fn capacity_row(from: &str, to: &str) -> ValidatedRow {
    row(vec![
        ("unifiedDeliveryDriver", text("1")),
        ("geoKey", text("NA")),
        ("capacity", CellValue::Integer(1000)),
        ("peakCapacity", CellValue::Integer(1200)),
        ("activationDateFrom", text(from)),
        ("activationDateTo", text(to)),
    ])
}
