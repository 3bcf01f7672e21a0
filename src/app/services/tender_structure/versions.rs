//! Contiguity checks for versioned file families

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::{
    CAPACITY_FILE_PREFIX, CAPACITY_VERSION_PATTERN, GEOKEY_FILE_PREFIX, GEOKEY_VERSION_PATTERN,
};
use crate::{Error, Result};

static GEOKEY_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(GEOKEY_VERSION_PATTERN).expect("geokey version pattern is valid")
});

static CAPACITY_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(CAPACITY_VERSION_PATTERN).expect("capacity version pattern is valid")
});

/// A `<Prefix>_v<N>.csv` file family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionedFamily {
    Geokey,
    Capacity,
}

impl VersionedFamily {
    pub fn prefix(self) -> &'static str {
        match self {
            VersionedFamily::Geokey => GEOKEY_FILE_PREFIX,
            VersionedFamily::Capacity => CAPACITY_FILE_PREFIX,
        }
    }

    /// Version number carried by `file_name`, if it belongs to the family
    pub fn version_of(self, file_name: &str) -> Option<u64> {
        let pattern = match self {
            VersionedFamily::Geokey => &GEOKEY_VERSION,
            VersionedFamily::Capacity => &CAPACITY_VERSION,
        };
        pattern.captures(file_name)?.get(1)?.as_str().parse().ok()
    }

    pub fn matches(self, file_name: &str) -> bool {
        self.version_of(file_name).is_some()
    }

    /// Canonical file name of version `version`
    pub fn file_name(self, version: u64) -> String {
        format!("{}_v{}.csv", self.prefix(), version)
    }
}

/// Members of `family` among `file_names`, sorted by version number
pub fn sorted_versions<'a>(family: VersionedFamily, file_names: &[&'a str]) -> Vec<&'a str> {
    let mut versioned: Vec<(u64, &str)> = file_names
        .iter()
        .filter_map(|name| family.version_of(name).map(|version| (version, *name)))
        .collect();
    versioned.sort_by_key(|(version, _)| *version);
    versioned.into_iter().map(|(_, name)| name).collect()
}

/// Require the members of `family` to be exactly `v1..vN`
///
/// After a numeric sort the file at position `n` (1-based) must be named
/// `<Prefix>_v<n>.csv`, which catches gaps, duplicates such as `v01` next to
/// `v1`, and sequences not starting at 1 in a single walk. An empty family
/// is accepted.
pub fn check_version_sequence(family: VersionedFamily, file_names: &[&str]) -> Result<()> {
    for (index, found) in sorted_versions(family, file_names).into_iter().enumerate() {
        let expected = family.file_name(index as u64 + 1);
        if found != expected {
            return Err(Error::structure(format!(
                "Expected {} version {} found {}",
                family.prefix(),
                expected,
                found
            )));
        }
    }
    Ok(())
}
