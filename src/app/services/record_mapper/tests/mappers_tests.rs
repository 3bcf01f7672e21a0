//! Tests for row to record mapping

use super::*;
use crate::app::models::RangedCost;
use crate::app::services::record_mapper::*;
use crate::app::services::tender_csv::field_validators::validate_utc_timestamp;
use crate::Error;

#[test]
fn test_composite_keys() {
    assert_eq!(product_lot_zone("AR", "1", "EU"), "AR#1#EU");
    assert_eq!(tender_product_geokey("20240101", "890", "00118"), "20240101#890#00118");
    assert_eq!(capacity_key("20240101", "POSTE", "RM"), "20240101~POSTE~RM");
}

#[test]
fn test_tender_record() {
    let row = row(vec![
        ("activationDate", text(TENDER_ACTIVATION)),
        ("tenderName", text("Gara 2024")),
        ("vat", CellValue::Integer(22)),
        ("nonDeductibleVat", CellValue::Integer(0)),
        ("fee", CellValue::Float(1.5)),
        ("pagePrice", CellValue::Float(0.1)),
        ("basePriceAR", CellValue::Float(2.3)),
        ("basePriceRS", CellValue::Float(3.4)),
        ("basePrice890", CellValue::Float(4.5)),
    ]);

    let record = tender_record(&row, "20240101").unwrap();
    assert_eq!(record.tender_id, "20240101");
    assert_eq!(record.activation_date, TENDER_ACTIVATION);
    assert_eq!(record.tender_name, "Gara 2024");
    assert_eq!(record.vat, 22);
    assert_eq!(record.base_price_ar, 2.3);
    assert_eq!(record.base_price_890, 4.5);
    assert!(validate_utc_timestamp(&record.created_at).is_ok());
}

#[test]
fn test_ranged_costs_from_range_columns() {
    let row = row(vec![
        ("product", text("AR")),
        ("range_1_10", CellValue::Float(50.0)),
        ("lot", text("1")),
        ("range_11_20", CellValue::Float(75.0)),
    ]);

    let mut costs = ranged_costs(&row).unwrap();
    costs.sort_by_key(|cost| cost.min_weight);
    assert_eq!(
        costs,
        vec![
            RangedCost {
                cost: 50.0,
                min_weight: 1,
                max_weight: 10,
            },
            RangedCost {
                cost: 75.0,
                min_weight: 11,
                max_weight: 20,
            },
        ]
    );
}

#[test]
fn test_ranged_costs_without_range_columns() {
    let row = row(vec![("product", text("AR"))]);
    assert!(ranged_costs(&row).unwrap().is_empty());
}

#[test]
fn test_tender_cost_record() {
    let row = row(vec![
        ("product", text("890")),
        ("lot", text("2")),
        ("zone", text("ZONE_1")),
        ("deliveryDriverName", text("Fulmine")),
        ("deliveryDriverId", text("FULMINE")),
        ("dematerializationCost", CellValue::Float(0.4)),
        ("range_0_20", CellValue::Float(12.5)),
    ]);

    let record = tender_cost_record(&row, "20240101").unwrap();
    assert_eq!(record.product_lot_zone, "890#2#ZONE_1");
    assert_eq!(record.delivery_driver_id, "FULMINE");
    assert_eq!(record.dematerialization_cost, 0.4);
    assert_eq!(record.ranged_costs.len(), 1);
    assert_eq!(record.ranged_costs[0].max_weight, 20);
}

fn geokey_row(activation_date: Option<&str>) -> ValidatedRow {
    let mut cells = vec![
        ("geokey", text("00118")),
        ("product", text("AR")),
        ("lot", text("1")),
        ("zone", text("EU")),
        ("coverFlag", CellValue::Bool(true)),
        ("dismissed", CellValue::Bool(false)),
    ];
    if let Some(date) = activation_date {
        cells.push(("activationDate", text(date)));
    }
    row(cells)
}

#[test]
fn test_geokey_inherits_tender_activation_date() {
    let record = geokey_record(&geokey_row(Some("")), "20240101", TENDER_ACTIVATION).unwrap();
    assert_eq!(record.activation_date, TENDER_ACTIVATION);

    let record = geokey_record(&geokey_row(None), "20240101", TENDER_ACTIVATION).unwrap();
    assert_eq!(record.activation_date, TENDER_ACTIVATION);
}

#[test]
fn test_geokey_keeps_own_activation_date() {
    let record = geokey_record(
        &geokey_row(Some("2024-03-01T00:00:00.000Z")),
        "20240101",
        TENDER_ACTIVATION,
    )
    .unwrap();

    assert_eq!(record.activation_date, "2024-03-01T00:00:00.000Z");
    assert_eq!(record.tender_product_geokey, "20240101#AR#00118");
    assert!(record.cover_flag);
    assert!(!record.dismissed);
}

#[test]
fn test_capacity_record_open_interval() {
    let record = capacity_record(&capacity_row("", ""), "20240101", TENDER_ACTIVATION).unwrap();

    assert_eq!(record.pk, "20240101~1~NA");
    assert_eq!(record.activation_date_from, TENDER_ACTIVATION);
    assert_eq!(record.activation_date_to, None);
    assert_eq!(record.capacity, 1000);
    assert_eq!(record.peak_capacity, 1200);
}

#[test]
fn test_capacity_record_closed_interval() {
    let record = capacity_record(
        &capacity_row("2025-03-01T00:00:00.000Z", "2025-04-01T00:00:00.000Z"),
        "20240101",
        TENDER_ACTIVATION,
    )
    .unwrap();

    assert_eq!(record.activation_date_from, "2025-03-01T00:00:00.000Z");
    assert_eq!(
        record.activation_date_to.as_deref(),
        Some("2025-04-01T00:00:00.000Z")
    );
}

#[test]
fn test_capacity_end_date_omitted_from_json() {
    let record = capacity_record(&capacity_row("", ""), "20240101", TENDER_ACTIVATION).unwrap();
    let json = serde_json::to_value(&record).unwrap();

    assert!(json.get("activationDateTo").is_none());
    assert_eq!(json["unifiedDeliveryDriver"], "1");
    assert_eq!(json["peakCapacity"], 1200);
}

#[test]
fn test_delivery_driver_record_defaults_absent_passthrough() {
    let row = row(vec![
        ("deliveryDriverId", text("POSTE")),
        ("taxId", text("01114601006")),
        ("fiscalCode", text("97103880585")),
        ("pec", text("poste@pec.it")),
        ("unifiedDeliveryDriver", text("POSTE")),
    ]);

    let record = delivery_driver_record(&row).unwrap();
    assert_eq!(record.pec, "poste@pec.it");
    assert_eq!(record.business_name, "");
    assert_eq!(record.registered_office, "");
    assert_eq!(record.unified_delivery_driver, "POSTE");
}

#[test]
fn test_province_record() {
    let row = row(vec![
        ("provincia", text("Roma")),
        ("sigla_provincia", text("RM")),
        ("regione", text("Lazio")),
    ]);

    let record = province_record(&row).unwrap();
    assert_eq!(record.province, "RM");
    assert_eq!(record.region, "Lazio");
}

#[test]
fn test_missing_column_is_located() {
    let row = row(vec![("product", text("AR"))]);
    let error = tender_cost_record(&row, "20240101").unwrap_err();

    match error {
        Error::CsvValue { file, line, column, .. } => {
            assert_eq!(file, "test.csv");
            assert_eq!(line, 2);
            assert_eq!(column, "lot");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_wrong_cell_type_is_rejected() {
    let row = row(vec![
        ("deliveryDriverId", text("POSTE")),
        ("taxId", CellValue::Integer(1)),
    ]);
    assert!(delivery_driver_record(&row).is_err());
}

#[test]
fn test_serialized_field_names() {
    let row = geokey_row(None);
    let record = geokey_record(&row, "20240101", TENDER_ACTIVATION).unwrap();
    let json = serde_json::to_value(&record).unwrap();

    for field in [
        "tenderProductGeokey",
        "activationDate",
        "tenderId",
        "product",
        "geokey",
        "lot",
        "zone",
        "coverFlag",
        "dismissed",
        "createdAt",
    ] {
        assert!(json.get(field).is_some(), "missing {field}");
    }
}
