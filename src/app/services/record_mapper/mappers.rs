//! Row to record conversions
//!
//! Every mapper turns one validated row into exactly one normalized record.
//! The only input not taken from the row is the creation timestamp, read
//! from the wall clock at mapping time.

use chrono::Utc;

use crate::app::models::{
    CapacityRecord, DeliveryDriverRecord, GeokeyRecord, ProvinceRecord, RangedCost,
    TenderCostRecord, TenderRecord,
};
use crate::app::services::tender_csv::{ValidatedRow, format_utc};
use crate::constants::{CAPACITY_KEY_SEPARATOR, HASH_KEY_SEPARATOR};
use crate::Result;

/// `product#lot#zone`
pub fn product_lot_zone(product: &str, lot: &str, zone: &str) -> String {
    [product, lot, zone].join(HASH_KEY_SEPARATOR)
}

/// `tenderId#product#geokey`
pub fn tender_product_geokey(tender_id: &str, product: &str, geokey: &str) -> String {
    [tender_id, product, geokey].join(HASH_KEY_SEPARATOR)
}

/// `tenderId~unifiedDeliveryDriver~geoKey`
pub fn capacity_key(tender_id: &str, carrier: &str, geo_key: &str) -> String {
    [tender_id, carrier, geo_key].join(CAPACITY_KEY_SEPARATOR)
}

fn created_at() -> String {
    format_utc(Utc::now())
}

/// Weight tiers declared by the `range_<min>_<max>` columns of a cost row,
/// in column order
pub fn ranged_costs(row: &ValidatedRow) -> Result<Vec<RangedCost>> {
    Ok(row
        .range_cells()?
        .into_iter()
        .map(|(range, cost)| RangedCost {
            cost,
            min_weight: range.min_weight,
            max_weight: range.max_weight,
        })
        .collect())
}

pub fn tender_record(row: &ValidatedRow, tender_id: &str) -> Result<TenderRecord> {
    Ok(TenderRecord {
        tender_id: tender_id.to_string(),
        activation_date: row.text("activationDate")?.to_string(),
        tender_name: row.text("tenderName")?.to_string(),
        vat: row.integer("vat")?,
        non_deductible_vat: row.integer("nonDeductibleVat")?,
        fee: row.float("fee")?,
        page_price: row.float("pagePrice")?,
        base_price_ar: row.float("basePriceAR")?,
        base_price_rs: row.float("basePriceRS")?,
        base_price_890: row.float("basePrice890")?,
        created_at: created_at(),
    })
}

pub fn tender_cost_record(row: &ValidatedRow, tender_id: &str) -> Result<TenderCostRecord> {
    let product = row.text("product")?;
    let lot = row.text("lot")?;
    let zone = row.text("zone")?;

    Ok(TenderCostRecord {
        tender_id: tender_id.to_string(),
        product_lot_zone: product_lot_zone(product, lot, zone),
        product: product.to_string(),
        lot: lot.to_string(),
        zone: zone.to_string(),
        delivery_driver_name: row.text("deliveryDriverName")?.to_string(),
        delivery_driver_id: row.text("deliveryDriverId")?.to_string(),
        dematerialization_cost: row.float("dematerializationCost")?,
        ranged_costs: ranged_costs(row)?,
        created_at: created_at(),
    })
}

/// Geokey rows without an activation date inherit the tender's
pub fn geokey_record(
    row: &ValidatedRow,
    tender_id: &str,
    tender_activation_date: &str,
) -> Result<GeokeyRecord> {
    let product = row.text("product")?;
    let geokey = row.text("geokey")?;
    let activation_date = row
        .optional_text("activationDate")?
        .unwrap_or(tender_activation_date);

    Ok(GeokeyRecord {
        tender_product_geokey: tender_product_geokey(tender_id, product, geokey),
        activation_date: activation_date.to_string(),
        tender_id: tender_id.to_string(),
        product: product.to_string(),
        geokey: geokey.to_string(),
        lot: row.text("lot")?.to_string(),
        zone: row.text("zone")?.to_string(),
        cover_flag: row.boolean("coverFlag")?,
        dismissed: row.boolean("dismissed")?,
        created_at: created_at(),
    })
}

/// Capacity rows without a start date inherit the tender activation date;
/// an empty end date leaves the interval open
pub fn capacity_record(
    row: &ValidatedRow,
    tender_id: &str,
    tender_activation_date: &str,
) -> Result<CapacityRecord> {
    let carrier = row.text("unifiedDeliveryDriver")?;
    let geo_key = row.text("geoKey")?;
    let activation_date_from = row
        .optional_text("activationDateFrom")?
        .unwrap_or(tender_activation_date);

    Ok(CapacityRecord {
        pk: capacity_key(tender_id, carrier, geo_key),
        activation_date_from: activation_date_from.to_string(),
        activation_date_to: row.optional_text("activationDateTo")?.map(str::to_string),
        tender_id: tender_id.to_string(),
        unified_delivery_driver: carrier.to_string(),
        geo_key: geo_key.to_string(),
        capacity: row.integer("capacity")?,
        peak_capacity: row.integer("peakCapacity")?,
        created_at: created_at(),
    })
}

pub fn delivery_driver_record(row: &ValidatedRow) -> Result<DeliveryDriverRecord> {
    let passthrough = |column: &str| -> Result<String> {
        Ok(row.optional_text(column)?.unwrap_or_default().to_string())
    };

    Ok(DeliveryDriverRecord {
        delivery_driver_id: row.text("deliveryDriverId")?.to_string(),
        tax_id: row.text("taxId")?.to_string(),
        business_name: passthrough("businessName")?,
        fiscal_code: row.text("fiscalCode")?.to_string(),
        pec: passthrough("pec")?,
        phone_number: passthrough("phoneNumber")?,
        registered_office: passthrough("registeredOffice")?,
        unified_delivery_driver: row.text("unifiedDeliveryDriver")?.to_string(),
        created_at: created_at(),
    })
}

pub fn province_record(row: &ValidatedRow) -> Result<ProvinceRecord> {
    Ok(ProvinceRecord {
        province: row.text("sigla_provincia")?.to_string(),
        region: row.text("regione")?.to_string(),
        created_at: created_at(),
    })
}
