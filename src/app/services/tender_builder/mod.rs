//! Tender bundle construction
//!
//! Turns the resolved files of one tender directory into a [`TenderBundle`]
//! holding every normalized record of the tender.
//!
//! [`TenderBundle`]: crate::app::models::TenderBundle

pub mod builder;

#[cfg(test)]
mod tests;

pub use builder::{
    build_capacities, build_delivery_drivers, build_geokeys, build_provinces, build_tender,
    build_tender_costs, build_tender_record,
};
