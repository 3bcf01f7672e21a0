//! Data models for tender building
//!
//! This module contains the resolved file bundle of a tender directory and the
//! normalized record shapes produced from its CSV files, named and serialized
//! after the target tables they are bulk-loaded into.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// =============================================================================
// Input File Bundles
// =============================================================================

/// Resolved CSV paths of one tender directory
///
/// Built once by the structure validator and consumed by the tender builder.
/// Versioned families are ordered by version number, starting at v1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenderFiles {
    /// Tender identifier, the 8-digit leaf name of the tender directory
    pub tender_id: String,

    /// The tender directory itself
    pub tender_dir: PathBuf,

    /// `Tender.csv`
    pub tender_csv: PathBuf,

    /// `TenderCosts.csv`
    pub tender_costs_csv: PathBuf,

    /// `DeliveryDriver.csv`
    pub delivery_driver_csv: PathBuf,

    /// `Geokey_v1.csv` .. `Geokey_vN.csv`
    pub geokey_csvs: Vec<PathBuf>,

    /// `Capacity_v1.csv` .. `Capacity_vN.csv`, possibly empty
    pub capacity_csvs: Vec<PathBuf>,

    /// `Province.csv` when the tender ships province reference data
    pub province_csv: Option<PathBuf>,
}

/// Validated tenders of one environment directory, sorted by tender id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentTenders {
    pub environment: String,
    pub tenders: Vec<TenderFiles>,
}

// =============================================================================
// Normalized Records
// =============================================================================

/// Tender terms, exactly one per tender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderRecord {
    pub tender_id: String,
    pub activation_date: String,
    pub tender_name: String,
    pub vat: i64,
    pub non_deductible_vat: i64,
    pub fee: f64,
    pub page_price: f64,
    #[serde(rename = "basePriceAR")]
    pub base_price_ar: f64,
    #[serde(rename = "basePriceRS")]
    pub base_price_rs: f64,
    pub base_price_890: f64,
    pub created_at: String,
}

/// One weight tier of a cost row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangedCost {
    pub cost: f64,
    pub min_weight: u64,
    pub max_weight: u64,
}

/// Cost table row keyed by `product#lot#zone`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderCostRecord {
    pub tender_id: String,
    pub product_lot_zone: String,
    pub product: String,
    pub lot: String,
    pub zone: String,
    pub delivery_driver_name: String,
    pub delivery_driver_id: String,
    pub dematerialization_cost: f64,
    pub ranged_costs: Vec<RangedCost>,
    pub created_at: String,
}

/// Geographic coverage key keyed by `tenderId#product#geokey`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeokeyRecord {
    pub tender_product_geokey: String,
    pub activation_date: String,
    pub tender_id: String,
    pub product: String,
    pub geokey: String,
    pub lot: String,
    pub zone: String,
    pub cover_flag: bool,
    pub dismissed: bool,
    pub created_at: String,
}

/// Carrier capacity for a geo key over a validity interval,
/// keyed by `tenderId~carrierId~geoKey`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityRecord {
    pub pk: String,
    pub activation_date_from: String,
    /// Open-ended when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_date_to: Option<String>,
    pub tender_id: String,
    pub unified_delivery_driver: String,
    pub geo_key: String,
    pub capacity: i64,
    pub peak_capacity: i64,
    pub created_at: String,
}

/// Carrier identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDriverRecord {
    pub delivery_driver_id: String,
    pub tax_id: String,
    pub business_name: String,
    pub fiscal_code: String,
    pub pec: String,
    pub phone_number: String,
    pub registered_office: String,
    pub unified_delivery_driver: String,
    pub created_at: String,
}

/// Province reference data, not linked to the tender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceRecord {
    pub province: String,
    pub region: String,
    pub created_at: String,
}

// =============================================================================
// Tender Bundle
// =============================================================================

/// All records built from one tender directory
#[derive(Debug, Clone, PartialEq)]
pub struct TenderBundle {
    pub tender_id: String,
    pub tender: TenderRecord,
    pub tender_costs: Vec<TenderCostRecord>,
    pub geokeys: Vec<GeokeyRecord>,
    pub delivery_drivers: Vec<DeliveryDriverRecord>,
    pub capacities: Vec<CapacityRecord>,
    /// `None` when the tender directory has no province file
    pub provinces: Option<Vec<ProvinceRecord>>,
}

impl TenderBundle {
    /// Total number of records across every collection
    pub fn record_count(&self) -> usize {
        1 + self.tender_costs.len()
            + self.geokeys.len()
            + self.delivery_drivers.len()
            + self.capacities.len()
            + self.provinces.as_ref().map_or(0, Vec::len)
    }
}
