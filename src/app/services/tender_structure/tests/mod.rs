//! Test fixtures for tender directory trees
//!
//! The fixtures here are shared with the tender builder tests: they lay out a
//! complete, valid input root in a temporary directory.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::app::services::tender_csv::tests::{TENDER_COSTS_CSV, TENDER_CSV};
use crate::constants::ENVIRONMENTS;


pub const GEOKEY_V1_CSV: &str = "activationDate;geokey;product;lot;zone;coverFlag;dismissed
;00118;AR;1;EU;true;false
2024-03-01T00:00:00.000Z;rm;890;2;ZONE_1;false;false";

pub const DELIVERY_DRIVER_CSV: &str = "deliveryDriverId;taxId;businessName;fiscalCode;pec;phoneNumber;registeredOffice;unifiedDeliveryDriver
POSTE;01114601006;Poste Italiane;97103880585;poste@pec.it;0659581;Roma;POSTE
FULMINE;02201430464;Fulmine Group;02201430464;;;;FULMINE";

pub const CAPACITY_V1_CSV: &str = "unifiedDeliveryDriver;geoKey;capacity;peakCapacity;activationDateFrom;activationDateTo
POSTE;RM;1000;1200;;
FULMINE;00118;500;600;2024-02-01T00:00:00.000Z;";

pub const PROVINCE_CSV: &str = "provincia;codice_istat_provincia;sigla_provincia;capolouogo_regione;codice_istat_regione;regione;residenti_provincia;residenti_regione;percentuale_provincia_regione;percentuale_regione_nazione
Roma;058;RM;Roma;12;Lazio;4216874;5714882;73,79;9,69";

/// The files of a minimal valid tender
pub fn valid_tender_files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Tender.csv", TENDER_CSV),
        ("TenderCosts.csv", TENDER_COSTS_CSV),
        ("Geokey_v1.csv", GEOKEY_V1_CSV),
        ("DeliveryDriver.csv", DELIVERY_DRIVER_CSV),
    ]
}

/// Write `files` into `<parent>/<tender_id>` and return the tender directory
pub fn create_tender(parent: &Path, tender_id: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = parent.join(tender_id);
    std::fs::create_dir_all(&dir).unwrap();
    for (name, content) in files {
        std::fs::write(dir.join(name), content).unwrap();
    }
    dir
}

/// An input root with every environment directory and no tenders
pub fn create_root() -> TempDir {
    let root = TempDir::new().unwrap();
    for environment in ENVIRONMENTS {
        std::fs::create_dir_all(root.path().join(environment)).unwrap();
    }
    root
}

/// A single valid tender directory inside a fresh temporary directory
pub fn create_valid_tender(tender_id: &str) -> (TempDir, PathBuf) {
    let parent = TempDir::new().unwrap();
    let dir = create_tender(parent.path(), tender_id, &valid_tender_files());
    (parent, dir)
}
