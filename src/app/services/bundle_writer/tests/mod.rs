//! Test fixtures for bundle output

use crate::app::models::{
    CapacityRecord, DeliveryDriverRecord, GeokeyRecord, RangedCost, TenderBundle,
    TenderCostRecord, TenderRecord,
};


pub const CREATED_AT: &str = "2024-07-23T10:26:11.676Z";

pub fn sample_tender() -> TenderRecord {
    TenderRecord {
        tender_id: "20240101".to_string(),
        activation_date: "2024-01-01T00:00:00.000Z".to_string(),
        tender_name: "Gara 2024".to_string(),
        vat: 22,
        non_deductible_vat: 0,
        fee: 1.5,
        page_price: 0.1,
        base_price_ar: 2.0,
        base_price_rs: 3.4,
        base_price_890: 4.5,
        created_at: CREATED_AT.to_string(),
    }
}

pub fn sample_cost() -> TenderCostRecord {
    TenderCostRecord {
        tender_id: "20240101".to_string(),
        product_lot_zone: "AR#1#EU".to_string(),
        product: "AR".to_string(),
        lot: "1".to_string(),
        zone: "EU".to_string(),
        delivery_driver_name: "Poste".to_string(),
        delivery_driver_id: "POSTE".to_string(),
        dematerialization_cost: 0.5,
        ranged_costs: vec![
            RangedCost {
                cost: 50.0,
                min_weight: 1,
                max_weight: 10,
            },
            RangedCost {
                cost: 75.25,
                min_weight: 11,
                max_weight: 20,
            },
        ],
        created_at: CREATED_AT.to_string(),
    }
}

pub fn sample_capacity(to: Option<&str>) -> CapacityRecord {
    CapacityRecord {
        pk: "20240101~POSTE~RM".to_string(),
        activation_date_from: "2024-01-01T00:00:00.000Z".to_string(),
        activation_date_to: to.map(str::to_string),
        tender_id: "20240101".to_string(),
        unified_delivery_driver: "POSTE".to_string(),
        geo_key: "RM".to_string(),
        capacity: 1000,
        peak_capacity: 1200,
        created_at: CREATED_AT.to_string(),
    }
}

pub fn sample_bundle() -> TenderBundle {
    TenderBundle {
        tender_id: "20240101".to_string(),
        tender: sample_tender(),
        tender_costs: vec![sample_cost(), sample_cost()],
        geokeys: vec![GeokeyRecord {
            tender_product_geokey: "20240101#AR#00118".to_string(),
            activation_date: "2024-01-01T00:00:00.000Z".to_string(),
            tender_id: "20240101".to_string(),
            product: "AR".to_string(),
            geokey: "00118".to_string(),
            lot: "1".to_string(),
            zone: "EU".to_string(),
            cover_flag: true,
            dismissed: false,
            created_at: CREATED_AT.to_string(),
        }],
        delivery_drivers: vec![DeliveryDriverRecord {
            delivery_driver_id: "POSTE".to_string(),
            tax_id: "01114601006".to_string(),
            business_name: "Poste Italiane".to_string(),
            fiscal_code: "97103880585".to_string(),
            pec: String::new(),
            phone_number: String::new(),
            registered_office: String::new(),
            unified_delivery_driver: "POSTE".to_string(),
            created_at: CREATED_AT.to_string(),
        }],
        capacities: Vec::new(),
        provinces: None,
    }
}
