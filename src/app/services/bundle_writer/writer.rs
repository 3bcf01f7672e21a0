//! Newline-delimited JSON output of tender bundles

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::marshal::marshal_record;
use crate::app::models::TenderBundle;
use crate::constants::{OUTPUT_FILE_EXTENSION, entities};
use crate::{Error, Result};

/// Shape of every output line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordFormat {
    /// DynamoDB attribute-value JSON, as consumed by the bulk loader
    #[default]
    AttributeValue,
    /// The records' own JSON form
    Plain,
}

/// Encode `records` one per line, without a trailing newline
pub fn encode_records<T: Serialize>(records: &[T], format: RecordFormat) -> Result<String> {
    let lines = records
        .iter()
        .map(|record| encode_record(record, format))
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

fn encode_record<T: Serialize>(record: &T, format: RecordFormat) -> Result<String> {
    let encoded = match format {
        RecordFormat::AttributeValue => serde_json::to_string(&marshal_record(record)?),
        RecordFormat::Plain => serde_json::to_string(record),
    };
    encoded.map_err(|e| Error::serialization("Failed to encode record", e))
}

/// Writes bundles under `<staging>/<environment>/<tenderId>/<Entity>.json`
#[derive(Debug, Clone)]
pub struct BundleWriter {
    staging_root: PathBuf,
    format: RecordFormat,
}

impl BundleWriter {
    pub fn new(staging_root: impl Into<PathBuf>, format: RecordFormat) -> Self {
        Self {
            staging_root: staging_root.into(),
            format,
        }
    }

    pub fn staging_root(&self) -> &Path {
        &self.staging_root
    }

    /// Directory receiving the files of one tender
    pub fn tender_dir(&self, environment: &str, tender_id: &str) -> PathBuf {
        self.staging_root.join(environment).join(tender_id)
    }

    /// Write every collection of `bundle`, returning the files written
    ///
    /// The capacity file is written even when empty; the province file only
    /// when the tender had a province file.
    pub fn write_bundle(&self, environment: &str, bundle: &TenderBundle) -> Result<Vec<PathBuf>> {
        let dir = self.tender_dir(environment, &bundle.tender_id);
        fs::create_dir_all(&dir)
            .map_err(|e| Error::io(format!("Failed to create {}", dir.display()), e))?;

        let mut written = vec![
            self.write_entity(&dir, entities::TENDER, std::slice::from_ref(&bundle.tender))?,
            self.write_entity(&dir, entities::COST, &bundle.tender_costs)?,
            self.write_entity(&dir, entities::GEOKEY, &bundle.geokeys)?,
            self.write_entity(&dir, entities::DELIVERY_DRIVER, &bundle.delivery_drivers)?,
            self.write_entity(&dir, entities::CAPACITY, &bundle.capacities)?,
        ];
        if let Some(provinces) = &bundle.provinces {
            written.push(self.write_entity(&dir, entities::PROVINCE, provinces)?);
        }

        debug!(
            "Wrote {} files for tender {} to {}",
            written.len(),
            bundle.tender_id,
            dir.display()
        );
        Ok(written)
    }

    fn write_entity<T: Serialize>(&self, dir: &Path, entity: &str, records: &[T]) -> Result<PathBuf> {
        let path = dir.join(format!("{}.{}", entity, OUTPUT_FILE_EXTENSION));
        let content = encode_records(records, self.format)?;
        fs::write(&path, content)
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
        Ok(path)
    }
}
