//! Overlap detection for carrier capacity validity intervals
//!
//! Capacity records are grouped by `(geoKey, unifiedDeliveryDriver)`. Within
//! a group, closed intervals sorted by start date must be strictly disjoint:
//! for consecutive intervals `A` then `B`, `A.to < B.from`. Checking adjacent
//! pairs is enough once the group is sorted.
//!
//! Open-ended records (no end date) never take part in the check, and
//! neither do degenerate ones whose end is not after their start.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::app::models::CapacityRecord;
use crate::{Error, Result};

/// Fail on the first pair of overlapping or nested intervals
///
/// Timestamps are canonical UTC strings, so string order is time order.
/// Groups are visited in key order, which keeps the reported conflict
/// stable for a given input.
pub fn check_capacity_intervals(records: &[CapacityRecord]) -> Result<()> {
    let mut groups: BTreeMap<(&str, &str), Vec<(&str, &str)>> = BTreeMap::new();

    for record in records {
        let Some(to) = record.activation_date_to.as_deref() else {
            continue;
        };
        let from = record.activation_date_from.as_str();
        if from >= to {
            warn!(
                "Skipping degenerate capacity interval {} - {} for geoKey {} and unifiedDeliveryDriver {}",
                from, to, record.geo_key, record.unified_delivery_driver
            );
            continue;
        }
        groups
            .entry((record.geo_key.as_str(), record.unified_delivery_driver.as_str()))
            .or_default()
            .push((from, to));
    }

    for ((geo_key, carrier), mut intervals) in groups {
        intervals.sort_by_key(|(from, _)| *from);

        for pair in intervals.windows(2) {
            let (_, previous_to) = pair[0];
            let (from, to) = pair[1];
            if previous_to >= from {
                return Err(Error::interval_conflict(geo_key, carrier, from, to));
            }
        }
        debug!(
            "{} closed capacity intervals for geoKey {} and unifiedDeliveryDriver {} are disjoint",
            intervals.len(),
            geo_key,
            carrier
        );
    }

    Ok(())
}
