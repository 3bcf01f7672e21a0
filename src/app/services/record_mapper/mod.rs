//! Mapping of validated CSV rows into normalized records
//!
//! Composite keys are built by plain concatenation:
//! - cost rows: `product#lot#zone`
//! - geokey rows: `tenderId#product#geokey`
//! - capacity rows: `tenderId~unifiedDeliveryDriver~geoKey`

pub mod mappers;

#[cfg(test)]
mod tests;

pub use mappers::{
    capacity_key, capacity_record, delivery_driver_record, geokey_record, product_lot_zone,
    province_record, ranged_costs, tender_cost_record, tender_product_geokey, tender_record,
};
