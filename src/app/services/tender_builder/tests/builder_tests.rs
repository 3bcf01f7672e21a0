//! Tests for building a tender bundle from a tender directory

use crate::Error;
use crate::app::services::tender_builder::*;
use crate::app::services::tender_structure::tests::{
    CAPACITY_V1_CSV, PROVINCE_CSV, create_valid_tender,
};
use crate::app::services::tender_structure::validate_tender_directory;

const TENDER_ACTIVATION: &str = "2024-01-01T00:00:00.000Z";

#[test]
fn test_build_minimal_tender() {
    let (_parent, dir) = create_valid_tender("20240101");
    let files = validate_tender_directory(&dir).unwrap();

    let bundle = build_tender(&files).unwrap();
    assert_eq!(bundle.tender_id, "20240101");
    assert_eq!(bundle.tender.tender_id, "20240101");
    assert_eq!(bundle.tender.activation_date, TENDER_ACTIVATION);
    assert_eq!(bundle.tender_costs.len(), 2);
    assert_eq!(bundle.geokeys.len(), 2);
    assert_eq!(bundle.delivery_drivers.len(), 2);
    assert!(bundle.capacities.is_empty());
    assert!(bundle.provinces.is_none());
    assert_eq!(bundle.record_count(), 7);
}

#[test]
fn test_geokey_v1_inherits_tender_activation_date() {
    let (_parent, dir) = create_valid_tender("20240101");
    let files = validate_tender_directory(&dir).unwrap();

    let geokeys = build_geokeys(&files, TENDER_ACTIVATION).unwrap();
    assert_eq!(geokeys[0].geokey, "00118");
    assert_eq!(geokeys[0].activation_date, TENDER_ACTIVATION);
    assert_eq!(geokeys[1].geokey, "rm");
    assert_eq!(geokeys[1].activation_date, "2024-03-01T00:00:00.000Z");
    assert_eq!(geokeys[1].tender_product_geokey, "20240101#890#rm");
}

#[test]
fn test_geokey_versions_are_concatenated_in_order() {
    let (_parent, dir) = create_valid_tender("20240101");
    std::fs::write(
        dir.join("Geokey_v2.csv"),
        "activationDate;geokey;product;lot;zone;coverFlag;dismissed
2024-06-01T00:00:00.000Z;00118;AR;1;EU;true;true",
    )
    .unwrap();
    let files = validate_tender_directory(&dir).unwrap();

    let geokeys = build_geokeys(&files, TENDER_ACTIVATION).unwrap();
    assert_eq!(geokeys.len(), 3);
    assert!(geokeys[2].dismissed);
    assert_eq!(geokeys[2].activation_date, "2024-06-01T00:00:00.000Z");
}

#[test]
fn test_capacities_and_provinces() {
    let (_parent, dir) = create_valid_tender("20240101");
    std::fs::write(dir.join("Capacity_v1.csv"), CAPACITY_V1_CSV).unwrap();
    std::fs::write(dir.join("Province.csv"), PROVINCE_CSV).unwrap();
    let files = validate_tender_directory(&dir).unwrap();

    let bundle = build_tender(&files).unwrap();
    assert_eq!(bundle.capacities.len(), 2);
    assert_eq!(bundle.capacities[0].pk, "20240101~POSTE~RM");
    assert_eq!(bundle.capacities[0].activation_date_from, TENDER_ACTIVATION);
    assert_eq!(bundle.capacities[1].activation_date_from, "2024-02-01T00:00:00.000Z");
    assert!(bundle.capacities.iter().all(|c| c.activation_date_to.is_none()));

    let provinces = bundle.provinces.unwrap();
    assert_eq!(provinces.len(), 1);
    assert_eq!(provinces[0].province, "RM");
    assert_eq!(provinces[0].region, "Lazio");
}

#[test]
fn test_overlapping_capacities_abort_the_build() {
    let (_parent, dir) = create_valid_tender("20240101");
    std::fs::write(dir.join("Capacity_v1.csv"), CAPACITY_V1_CSV).unwrap();
    std::fs::write(
        dir.join("Capacity_v2.csv"),
        "unifiedDeliveryDriver;geoKey;capacity;peakCapacity;activationDateFrom;activationDateTo
1;NA;100;150;2025-03-01T00:00:00.000Z;2025-04-01T00:00:00.000Z
1;NA;100;150;2025-03-20T00:00:00.000Z;2025-04-20T00:00:00.000Z",
    )
    .unwrap();
    let files = validate_tender_directory(&dir).unwrap();

    let error = build_tender(&files).unwrap_err();
    assert!(matches!(error, Error::IntervalConflict { .. }));
    assert!(error.to_string().contains("geoKey: NA"));
}

#[test]
fn test_disjoint_capacities_are_kept_unmodified() {
    let (_parent, dir) = create_valid_tender("20240101");
    std::fs::write(dir.join("Capacity_v1.csv"), CAPACITY_V1_CSV).unwrap();
    std::fs::write(
        dir.join("Capacity_v2.csv"),
        "unifiedDeliveryDriver;geoKey;capacity;peakCapacity;activationDateFrom;activationDateTo
1;NA;100;150;2025-03-01T00:00:00.000Z;2025-04-01T00:00:00.000Z
1;NA;200;250;2025-04-02T00:00:00.000Z;2025-05-01T00:00:00.000Z",
    )
    .unwrap();
    let files = validate_tender_directory(&dir).unwrap();

    let capacities = build_capacities(&files, TENDER_ACTIVATION).unwrap();
    assert_eq!(capacities.len(), 4);
    assert_eq!(capacities[2].capacity, 100);
    assert_eq!(
        capacities[2].activation_date_to.as_deref(),
        Some("2025-04-01T00:00:00.000Z")
    );
    assert_eq!(capacities[3].peak_capacity, 250);
}

#[test]
fn test_tender_file_with_two_rows() {
    let (_parent, dir) = create_valid_tender("20240101");
    std::fs::write(
        dir.join("Tender.csv"),
        "activationDate;tenderName;vat;nonDeductibleVat;fee;pagePrice;basePriceAR;basePriceRS;basePrice890
2024-01-01T00:00:00.000Z;Gara A;22;0;1;1;1;1;1
2024-02-01T00:00:00.000Z;Gara B;22;0;1;1;1;1;1",
    )
    .unwrap();
    let files = validate_tender_directory(&dir).unwrap();

    let error = build_tender(&files).unwrap_err();
    assert!(matches!(error, Error::Cardinality { .. }));
    assert_eq!(
        error.to_string(),
        format!("More than one Tender row found in {}", files.tender_csv.display())
    );
}

#[test]
fn test_tender_file_without_rows() {
    let (_parent, dir) = create_valid_tender("20240101");
    std::fs::write(
        dir.join("Tender.csv"),
        "activationDate;tenderName;vat;nonDeductibleVat;fee;pagePrice;basePriceAR;basePriceRS;basePrice890",
    )
    .unwrap();
    let files = validate_tender_directory(&dir).unwrap();

    let error = build_tender_record(&files).unwrap_err();
    assert_eq!(
        error.to_string(),
        format!("Tender row not found in {}", files.tender_csv.display())
    );
}

#[test]
fn test_invalid_cell_names_file_line_and_column() {
    let (_parent, dir) = create_valid_tender("20240101");
    std::fs::write(
        dir.join("DeliveryDriver.csv"),
        "deliveryDriverId;taxId;fiscalCode;unifiedDeliveryDriver
POSTE;;97103880585;POSTE",
    )
    .unwrap();
    let files = validate_tender_directory(&dir).unwrap();

    let error = build_tender(&files).unwrap_err();
    assert_eq!(
        error.to_string(),
        format!(
            "Value is empty\n on file {} line 2 column \"taxId\"",
            files.delivery_driver_csv.display()
        )
    );
}
