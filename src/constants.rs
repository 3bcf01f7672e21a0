//! Application constants for the tender builder
//!
//! This module contains the fixed domain vocabulary: CSV dialect, directory
//! layout, file naming conventions, output entity names and the enumerated
//! product / zone codes.

// =============================================================================
// CSV Dialect
// =============================================================================

/// Field delimiter used by every tender CSV file
pub const CSV_DELIMITER: u8 = b';';

/// Canonical UTC timestamp example shown in validation messages
pub const UTC_TIMESTAMP_EXAMPLE: &str = "2024-07-23T10:26:11.676Z";

/// Decimal-comma float example shown in validation messages
pub const FLOAT_EXAMPLE: &str = "23,45";

// =============================================================================
// Directory Layout
// =============================================================================

/// Environment directories that must exist under the root, in processing order
pub const ENVIRONMENTS: &[&str] = &["dev", "test", "uat", "hotfix", "prod"];

/// Tender directory names are 8-digit dates (YYYYMMDD)
pub const TENDER_DIR_PATTERN: &str = r"^\d{8}$";

/// Only files with this extension take part in tender validation
pub const TENDER_FILE_PATTERN: &str = "*.csv";

// =============================================================================
// Tender File Names
// =============================================================================

pub const TENDER_FILE: &str = "Tender.csv";
pub const TENDER_COSTS_FILE: &str = "TenderCosts.csv";
pub const GEOKEY_V1_FILE: &str = "Geokey_v1.csv";
pub const DELIVERY_DRIVER_FILE: &str = "DeliveryDriver.csv";
pub const PROVINCE_FILE: &str = "Province.csv";

/// Files every tender directory must contain
pub const REQUIRED_TENDER_FILES: &[&str] = &[
    TENDER_FILE,
    TENDER_COSTS_FILE,
    GEOKEY_V1_FILE,
    DELIVERY_DRIVER_FILE,
];

/// Versioned geokey files: `Geokey_v<N>.csv`
pub const GEOKEY_FILE_PREFIX: &str = "Geokey";
pub const GEOKEY_VERSION_PATTERN: &str = r"^Geokey_v(\d+)\.csv$";

/// Versioned capacity files: `Capacity_v<N>.csv`
pub const CAPACITY_FILE_PREFIX: &str = "Capacity";
pub const CAPACITY_VERSION_PATTERN: &str = r"^Capacity_v(\d+)\.csv$";

/// Dynamically named weight-range columns: `range_<minWeight>_<maxWeight>`
pub const RANGE_COLUMN_PATTERN: &str = r"^range_(\d+)_(\d+)$";

// =============================================================================
// Output Entities
// =============================================================================

/// Target table names, used as output file stems
pub mod entities {
    pub const TENDER: &str = "pn-PaperChannelTender";
    pub const COST: &str = "pn-PaperChannelCost";
    pub const GEOKEY: &str = "pn-PaperChannelGeokey";
    pub const DELIVERY_DRIVER: &str = "pn-PaperChannelDeliveryDriver";
    pub const CAPACITY: &str = "pn-PaperDeliveryDriverCapacities";
    pub const PROVINCE: &str = "pn-Provinces";
}

/// Extension of the newline-delimited JSON output files
pub const OUTPUT_FILE_EXTENSION: &str = "json";

/// Separator of the `product#lot#zone` and `tenderId#product#geokey` keys
pub const HASH_KEY_SEPARATOR: &str = "#";

/// Separator of the `tenderId~carrierId~geoKey` capacity key
pub const CAPACITY_KEY_SEPARATOR: &str = "~";

// =============================================================================
// Enumerated Codes
// =============================================================================

/// Postal products
pub const PRODUCTS: &[&str] = &["RS", "RIR", "RIS", "AR", "890"];

/// Delivery zones
pub const ZONES: &[&str] = &["EU", "AM", "CP", "ZONE_1", "ZONE_2", "ZONE_3"];

// =============================================================================
// CLI Defaults
// =============================================================================

/// Default archive path when `--out-file` is not given
pub const DEFAULT_OUT_FILE: &str = "tender.zip";

/// Prefix of the temporary staging directory
pub const STAGING_DIR_PREFIX: &str = "tender-builder-";
