//! Per-record-type column dispatch for tender CSV files
//!
//! Parsing is two-phase: every header cell is first classified as a known
//! static column or a `range_<min>_<max>` weight column, then each data cell
//! is validated by the validator of its classified column. Versioned file
//! families carry extra rules keyed on the version in the file name.

use super::field_validators::{
    ValidationResult, passthrough, validate_boolean, validate_geo_key, validate_integer,
    validate_locale_float, validate_non_empty, validate_optional_utc_timestamp, validate_product,
    validate_utc_timestamp, validate_zone,
};
use super::row::CellValue;
use crate::app::services::tender_structure::VersionedFamily;
use crate::constants::RANGE_COLUMN_PATTERN;
use crate::{Error, Result, ValidationError};
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

static RANGE_COLUMN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(RANGE_COLUMN_PATTERN).expect("range column pattern is valid")
});

// =============================================================================
// Record Types and Column Tables
// =============================================================================

/// The file families a tender directory is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Tender,
    TenderCosts,
    Geokey,
    Capacity,
    DeliveryDriver,
    Province,
}

impl RecordType {
    /// Static columns recognized for this record type
    pub fn columns(self) -> &'static [ColumnSpec] {
        match self {
            RecordType::Tender => TENDER_COLUMNS,
            RecordType::TenderCosts => TENDER_COSTS_COLUMNS,
            RecordType::Geokey => GEOKEY_COLUMNS,
            RecordType::Capacity => CAPACITY_COLUMNS,
            RecordType::DeliveryDriver => DELIVERY_DRIVER_COLUMNS,
            RecordType::Province => PROVINCE_COLUMNS,
        }
    }

    /// True for the `<Prefix>_v<N>.csv` families
    pub fn is_versioned(self) -> bool {
        matches!(self, RecordType::Geokey | RecordType::Capacity)
    }

    /// Whether `range_<min>_<max>` columns are accepted
    pub fn accepts_range_columns(self) -> bool {
        self == RecordType::TenderCosts
    }

    /// File family of versioned record types
    pub fn versioned_family(self) -> Option<VersionedFamily> {
        match self {
            RecordType::Geokey => Some(VersionedFamily::Geokey),
            RecordType::Capacity => Some(VersionedFamily::Capacity),
            _ => None,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordType::Tender => "Tender",
            RecordType::TenderCosts => "TenderCosts",
            RecordType::Geokey => "Geokey",
            RecordType::Capacity => "Capacity",
            RecordType::DeliveryDriver => "DeliveryDriver",
            RecordType::Province => "Province",
        };
        write!(f, "{}", name)
    }
}

/// Validator attached to a static column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Boolean,
    NonEmpty,
    Passthrough,
    UtcTimestamp,
    OptionalUtcTimestamp,
    Integer,
    LocaleFloat,
    Product,
    Zone,
    GeoKey,
}

impl FieldKind {
    /// Run the validator and wrap the coerced value
    pub fn validate(self, raw: &str) -> ValidationResult<CellValue> {
        Ok(match self {
            FieldKind::Boolean => CellValue::Bool(validate_boolean(raw)?),
            FieldKind::NonEmpty => CellValue::Text(validate_non_empty(raw)?),
            FieldKind::Passthrough => CellValue::Text(passthrough(raw)),
            FieldKind::UtcTimestamp => CellValue::Text(validate_utc_timestamp(raw)?),
            FieldKind::OptionalUtcTimestamp => {
                CellValue::Text(validate_optional_utc_timestamp(raw)?)
            }
            FieldKind::Integer => CellValue::Integer(validate_integer(raw)?),
            FieldKind::LocaleFloat => CellValue::Float(validate_locale_float(raw)?),
            FieldKind::Product => CellValue::Text(validate_product(raw)?),
            FieldKind::Zone => CellValue::Text(validate_zone(raw)?),
            FieldKind::GeoKey => CellValue::Text(validate_geo_key(raw)?),
        })
    }
}

/// A statically known column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Must appear in the header (versioned files may tighten this)
    pub required: bool,
}

const fn column(name: &'static str, kind: FieldKind, required: bool) -> ColumnSpec {
    ColumnSpec {
        name,
        kind,
        required,
    }
}

const TENDER_COLUMNS: &[ColumnSpec] = &[
    column("activationDate", FieldKind::UtcTimestamp, true),
    column("tenderName", FieldKind::NonEmpty, true),
    column("vat", FieldKind::Integer, true),
    column("nonDeductibleVat", FieldKind::Integer, true),
    column("fee", FieldKind::LocaleFloat, true),
    column("pagePrice", FieldKind::LocaleFloat, true),
    column("basePriceAR", FieldKind::LocaleFloat, true),
    column("basePriceRS", FieldKind::LocaleFloat, true),
    column("basePrice890", FieldKind::LocaleFloat, true),
];

const TENDER_COSTS_COLUMNS: &[ColumnSpec] = &[
    column("product", FieldKind::Product, true),
    column("lot", FieldKind::NonEmpty, true),
    column("zone", FieldKind::Zone, true),
    column("deliveryDriverName", FieldKind::NonEmpty, true),
    column("deliveryDriverId", FieldKind::NonEmpty, true),
    column("dematerializationCost", FieldKind::LocaleFloat, true),
];

const GEOKEY_COLUMNS: &[ColumnSpec] = &[
    column("activationDate", FieldKind::UtcTimestamp, false),
    column("geokey", FieldKind::GeoKey, true),
    column("product", FieldKind::Product, true),
    column("lot", FieldKind::NonEmpty, true),
    column("zone", FieldKind::Zone, true),
    column("coverFlag", FieldKind::Boolean, true),
    column("dismissed", FieldKind::Boolean, true),
];

const CAPACITY_COLUMNS: &[ColumnSpec] = &[
    column("unifiedDeliveryDriver", FieldKind::NonEmpty, true),
    column("geoKey", FieldKind::GeoKey, true),
    column("capacity", FieldKind::Integer, true),
    column("peakCapacity", FieldKind::Integer, true),
    column("activationDateFrom", FieldKind::OptionalUtcTimestamp, false),
    column("activationDateTo", FieldKind::OptionalUtcTimestamp, false),
];

const DELIVERY_DRIVER_COLUMNS: &[ColumnSpec] = &[
    column("deliveryDriverId", FieldKind::NonEmpty, true),
    column("taxId", FieldKind::NonEmpty, true),
    column("businessName", FieldKind::Passthrough, false),
    column("fiscalCode", FieldKind::NonEmpty, true),
    column("pec", FieldKind::Passthrough, false),
    column("phoneNumber", FieldKind::Passthrough, false),
    column("registeredOffice", FieldKind::Passthrough, false),
    column("unifiedDeliveryDriver", FieldKind::NonEmpty, true),
];

const PROVINCE_COLUMNS: &[ColumnSpec] = &[
    column("provincia", FieldKind::Passthrough, false),
    column("codice_istat_provincia", FieldKind::Passthrough, false),
    column("sigla_provincia", FieldKind::NonEmpty, true),
    column("capolouogo_regione", FieldKind::Passthrough, false),
    column("codice_istat_regione", FieldKind::Passthrough, false),
    column("regione", FieldKind::NonEmpty, true),
    column("residenti_provincia", FieldKind::Passthrough, false),
    column("residenti_regione", FieldKind::Passthrough, false),
    column("percentuale_provincia_regione", FieldKind::Passthrough, false),
    column("percentuale_regione_nazione", FieldKind::Passthrough, false),
];

// =============================================================================
// Column Classification
// =============================================================================

/// A `range_<minWeight>_<maxWeight>` column name with its bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeColumn {
    pub name: String,
    pub min_weight: u64,
    pub max_weight: u64,
}

/// Match a column name against the weight-range pattern
///
/// Returns `None` when the name does not have the range shape or its bounds
/// do not fit in a `u64`. Bound ordering is checked by the column parser.
pub fn parse_range_column(name: &str) -> Option<RangeColumn> {
    let captures = RANGE_COLUMN.captures(name)?;
    let min_weight = captures.get(1)?.as_str().parse().ok()?;
    let max_weight = captures.get(2)?.as_str().parse().ok()?;
    Some(RangeColumn {
        name: name.to_string(),
        min_weight,
        max_weight,
    })
}

/// A classified header cell
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Static(&'static ColumnSpec),
    Range(RangeColumn),
}

impl Column {
    pub fn name(&self) -> &str {
        match self {
            Column::Static(spec) => spec.name,
            Column::Range(range) => &range.name,
        }
    }
}

/// Extract `N` from a `<Prefix>_v<N>.csv` file name
pub fn file_version(record_type: RecordType, path: &Path) -> Option<u32> {
    let family = record_type.versioned_family()?;
    let file_name = path.file_name()?.to_str()?;
    u32::try_from(family.version_of(file_name)?).ok()
}

// =============================================================================
// Column Parser
// =============================================================================

/// Column dispatch for one source file
#[derive(Debug, Clone)]
pub struct ColumnParser {
    record_type: RecordType,
    version: Option<u32>,
    source: String,
}

impl ColumnParser {
    /// Build the parser for `path`, reading the version of versioned families
    /// from the file name
    pub fn new(record_type: RecordType, path: &Path) -> Result<Self> {
        let version = if record_type.is_versioned() {
            let version = file_version(record_type, path).ok_or_else(|| {
                Error::structure(format!(
                    "Invalid {} file name {}",
                    record_type.to_string().to_lowercase(),
                    path.display()
                ))
            })?;
            Some(version)
        } else {
            None
        };

        Ok(Self {
            record_type,
            version,
            source: path.display().to_string(),
        })
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Version of a versioned file, `None` for the other families
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// Display form of the source path
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Classify a header cell
    ///
    /// Range columns are only recognized for cost files and bypass the static
    /// table; their bounds must be strictly increasing.
    pub fn classify(&self, name: &str) -> ValidationResult<Column> {
        if self.record_type.accepts_range_columns() {
            if let Some(range) = parse_range_column(name) {
                if range.min_weight >= range.max_weight {
                    return Err(ValidationError::InvalidRange {
                        column: name.to_string(),
                        file: self.source.clone(),
                    });
                }
                return Ok(Column::Range(range));
            }
        }

        self.record_type
            .columns()
            .iter()
            .find(|spec| spec.name == name)
            .map(Column::Static)
            .ok_or_else(|| ValidationError::invalid_column(name, &self.source))
    }

    /// Static columns that must be present in the header of this file
    pub fn required_columns(&self) -> Vec<&'static str> {
        self.record_type
            .columns()
            .iter()
            .filter(|spec| spec.required || self.is_mandatory_for_version(spec.name))
            .map(|spec| spec.name)
            .collect()
    }

    /// Fail on the first required column missing from a classified header
    pub fn check_header(&self, columns: &[Column]) -> ValidationResult<()> {
        for required in self.required_columns() {
            if !columns.iter().any(|column| column.name() == required) {
                return Err(ValidationError::MissingColumn {
                    column: required.to_string(),
                    file: self.source.clone(),
                });
            }
        }
        Ok(())
    }

    /// Validate a cell of an already classified column
    pub fn parse_classified(&self, raw: &str, column: &Column) -> ValidationResult<CellValue> {
        match column {
            Column::Range(_) => FieldKind::LocaleFloat.validate(raw),
            Column::Static(spec) => {
                if let Some(value) = self.apply_version_rules(raw, spec.name)? {
                    return Ok(value);
                }
                spec.kind.validate(raw)
            }
        }
    }

    /// Classify `column` and validate `raw` in one step
    pub fn parse_cell(&self, raw: &str, column: &str) -> ValidationResult<CellValue> {
        let column = self.classify(column)?;
        self.parse_classified(raw, &column)
    }

    /// Version-specific handling of activation date columns.
    ///
    /// Returns `Some` when the rule fully decides the cell value.
    fn apply_version_rules(&self, raw: &str, column: &str) -> ValidationResult<Option<CellValue>> {
        let Some(version) = self.version else {
            return Ok(None);
        };
        let empty = raw.trim().is_empty();

        match (self.record_type, column) {
            // Geokey_v1 predates mandatory activation dates
            (RecordType::Geokey, "activationDate") if version == 1 && empty => {
                Ok(Some(CellValue::Text(String::new())))
            }
            (RecordType::Capacity, "activationDateFrom") if version == 1 && empty => {
                Ok(Some(CellValue::Text(String::new())))
            }
            (RecordType::Capacity, "activationDateTo") if version == 1 && !empty => {
                Err(ValidationError::invalid_value(format!(
                    "You cannot give a value for Column {} in version {} for file {}",
                    column, version, self.source
                )))
            }
            (RecordType::Capacity, "activationDateFrom" | "activationDateTo")
                if version > 1 && empty =>
            {
                Err(ValidationError::invalid_value(format!(
                    "Column {} is mandatory in version {} for file {}",
                    column, version, self.source
                )))
            }
            _ => Ok(None),
        }
    }

    fn is_mandatory_for_version(&self, column: &str) -> bool {
        match (self.record_type, self.version) {
            (RecordType::Geokey, Some(version)) => version > 1 && column == "activationDate",
            (RecordType::Capacity, Some(version)) => {
                version > 1 && matches!(column, "activationDateFrom" | "activationDateTo")
            }
            _ => false,
        }
    }
}
