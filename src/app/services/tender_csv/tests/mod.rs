//! Test utilities for the tender CSV reader
//!
//! Fixtures write small `;`-delimited files into a temporary directory so the
//! reader sees real paths (versioned families take their version from the
//! file name).

use std::path::PathBuf;
use tempfile::TempDir;


pub const TENDER_CSV: &str = "activationDate;tenderName;vat;nonDeductibleVat;fee;pagePrice;basePriceAR;basePriceRS;basePrice890
2024-01-01T00:00:00.000Z;Gara 2024;22;0;1,50;0,10;2,30;3,40;4,50";

pub const TENDER_COSTS_CSV: &str = "product;lot;zone;deliveryDriverName;deliveryDriverId;dematerializationCost;range_1_10;range_11_20
AR;1;EU;Poste;POSTE;0,50;50;75
890;2;ZONE_1;Fulmine;FULMINE;0,40;12,5;20";

/// Write `content` as `name` inside a fresh temporary directory
///
/// The directory is returned so it outlives the test body.
pub fn write_csv(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (dir, path)
}
