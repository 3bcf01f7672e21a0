//! Output of tender bundles for bulk loading
//!
//! Bundles are written as newline-delimited JSON files into a staging tree
//! that is then zipped into a single archive:
//!
//! ```text
//! <staging>/<environment>/<tenderId>/pn-PaperChannelTender.json
//!                                    pn-PaperChannelCost.json
//!                                    pn-PaperChannelGeokey.json
//!                                    pn-PaperChannelDeliveryDriver.json
//!                                    pn-PaperDeliveryDriverCapacities.json
//!                                    pn-Provinces.json (optional)
//! ```

pub mod archive;
pub mod marshal;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use archive::{ArchiveSummary, archive_directory};
pub use marshal::{marshal_record, to_attribute_value};
pub use writer::{BundleWriter, RecordFormat, encode_records};
