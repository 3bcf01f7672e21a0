//! Directory structure validation for tender input trees
//!
//! The input root holds one directory per environment (`dev`, `test`, `uat`,
//! `hotfix`, `prod`), each with zero or more tender directories named as
//! 8-digit dates. A tender directory holds the required CSV files plus the
//! contiguous `Geokey_vN` / `Capacity_vN` families and an optional province
//! file; anything else with a `.csv` extension is rejected.
//!
//! - [`validator`] - root, environment and tender directory checks
//! - [`versions`] - contiguity of the versioned file families

pub mod validator;
pub mod versions;

#[cfg(test)]
pub mod tests;

pub use validator::{validate_environment, validate_root, validate_tender_directory};
pub use versions::{VersionedFamily, check_version_sequence};
