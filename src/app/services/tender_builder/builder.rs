//! Per-tender orchestration: read, map and check every file category

use tracing::{debug, info};

use crate::app::models::{
    CapacityRecord, DeliveryDriverRecord, GeokeyRecord, ProvinceRecord, TenderBundle,
    TenderCostRecord, TenderFiles, TenderRecord,
};
use crate::app::services::capacity_intervals::check_capacity_intervals;
use crate::app::services::record_mapper::{
    capacity_record, delivery_driver_record, geokey_record, province_record, tender_cost_record,
    tender_record,
};
use crate::app::services::tender_csv::{RecordType, read_csv};
use crate::{Error, Result};

/// Build every record of one tender directory
///
/// The single tender row supplies the activation date inherited by geokey
/// and capacity rows without their own. Capacity intervals are checked over
/// the records of all capacity versions together.
pub fn build_tender(files: &TenderFiles) -> Result<TenderBundle> {
    info!("Building tender {}", files.tender_dir.display());

    let tender = build_tender_record(files)?;
    let activation_date = tender.activation_date.clone();

    let bundle = TenderBundle {
        tender_id: files.tender_id.clone(),
        tender_costs: build_tender_costs(files)?,
        geokeys: build_geokeys(files, &activation_date)?,
        delivery_drivers: build_delivery_drivers(files)?,
        capacities: build_capacities(files, &activation_date)?,
        provinces: build_provinces(files)?,
        tender,
    };

    debug!(
        "Tender {} built with {} records",
        bundle.tender_id,
        bundle.record_count()
    );
    Ok(bundle)
}

/// The tender record; the file must hold exactly one data row
pub fn build_tender_record(files: &TenderFiles) -> Result<TenderRecord> {
    let rows = read_csv(&files.tender_csv, RecordType::Tender)?;

    match rows.as_slice() {
        [] => Err(Error::cardinality(format!(
            "Tender row not found in {}",
            files.tender_csv.display()
        ))),
        [row] => tender_record(row, &files.tender_id),
        _ => Err(Error::cardinality(format!(
            "More than one Tender row found in {}",
            files.tender_csv.display()
        ))),
    }
}

pub fn build_tender_costs(files: &TenderFiles) -> Result<Vec<TenderCostRecord>> {
    read_csv(&files.tender_costs_csv, RecordType::TenderCosts)?
        .iter()
        .map(|row| tender_cost_record(row, &files.tender_id))
        .collect()
}

/// Geokey records of every version, in version order
pub fn build_geokeys(files: &TenderFiles, activation_date: &str) -> Result<Vec<GeokeyRecord>> {
    let mut records = Vec::new();
    for path in &files.geokey_csvs {
        for row in read_csv(path, RecordType::Geokey)? {
            records.push(geokey_record(&row, &files.tender_id, activation_date)?);
        }
    }
    Ok(records)
}

/// Capacity records of every version, rejected as a whole when two closed
/// intervals of the same geo key and carrier overlap
pub fn build_capacities(
    files: &TenderFiles,
    activation_date: &str,
) -> Result<Vec<CapacityRecord>> {
    let mut records = Vec::new();
    for path in &files.capacity_csvs {
        for row in read_csv(path, RecordType::Capacity)? {
            records.push(capacity_record(&row, &files.tender_id, activation_date)?);
        }
    }

    check_capacity_intervals(&records)?;
    Ok(records)
}

pub fn build_delivery_drivers(files: &TenderFiles) -> Result<Vec<DeliveryDriverRecord>> {
    read_csv(&files.delivery_driver_csv, RecordType::DeliveryDriver)?
        .iter()
        .map(delivery_driver_record)
        .collect()
}

/// Province records, `None` when the tender ships no province file
pub fn build_provinces(files: &TenderFiles) -> Result<Option<Vec<ProvinceRecord>>> {
    let Some(path) = &files.province_csv else {
        return Ok(None);
    };

    let records = read_csv(path, RecordType::Province)?
        .iter()
        .map(province_record)
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(records))
}
