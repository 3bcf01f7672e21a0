//! Root / environment / tender directory validation

use glob::Pattern;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};
use walkdir::WalkDir;

use super::versions::{VersionedFamily, check_version_sequence, sorted_versions};
use crate::app::models::{EnvironmentTenders, TenderFiles};
use crate::constants::{
    DELIVERY_DRIVER_FILE, ENVIRONMENTS, PROVINCE_FILE, REQUIRED_TENDER_FILES, TENDER_COSTS_FILE,
    TENDER_DIR_PATTERN, TENDER_FILE, TENDER_FILE_PATTERN,
};
use crate::{Error, Result};

static TENDER_DIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(TENDER_DIR_PATTERN).expect("tender directory pattern is valid")
});

static CSV_FILE: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::new(TENDER_FILE_PATTERN).expect("tender file pattern is valid")
});

/// Validate the whole input tree
///
/// Every environment directory must exist. Environments are returned in
/// their fixed processing order, each with its tenders sorted by id.
pub fn validate_root(root: &Path) -> Result<Vec<EnvironmentTenders>> {
    ensure_exists(root)?;

    let present = list_entries(root, |path| path.is_dir())?;
    for environment in ENVIRONMENTS {
        if !present.iter().any(|name| name == environment) {
            return Err(Error::structure(format!(
                "The env directory {} is missing in {}",
                environment,
                root.display()
            )));
        }
    }

    let mut environments = Vec::with_capacity(ENVIRONMENTS.len());
    for environment in ENVIRONMENTS {
        let tenders = validate_environment(&root.join(environment))?;
        environments.push(EnvironmentTenders {
            environment: environment.to_string(),
            tenders,
        });
    }

    info!("The project structure of {} is valid", root.display());
    Ok(environments)
}

/// Validate every tender directory of one environment
///
/// Only subdirectories named as 8-digit dates are tender directories; any
/// other entry is ignored.
pub fn validate_environment(env_path: &Path) -> Result<Vec<TenderFiles>> {
    ensure_exists(env_path)?;

    let tender_dirs = list_entries(env_path, |path| path.is_dir())?
        .into_iter()
        .filter(|name| TENDER_DIR.is_match(name))
        .collect::<Vec<_>>();

    let tenders = tender_dirs
        .iter()
        .map(|name| validate_tender_directory(&env_path.join(name)))
        .collect::<Result<Vec<_>>>()?;

    info!(
        "{} structure is valid ({} tenders)",
        env_path.display(),
        tenders.len()
    );
    Ok(tenders)
}

/// Validate the CSV files of one tender directory and resolve their paths
pub fn validate_tender_directory(dir: &Path) -> Result<TenderFiles> {
    let files = list_entries(dir, |path| path.is_file())?
        .into_iter()
        .filter(|name| CSV_FILE.matches(name))
        .collect::<Vec<_>>();
    let names: Vec<&str> = files.iter().map(String::as_str).collect();

    let untracked: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| !is_tracked(name))
        .collect();
    if !untracked.is_empty() {
        return Err(Error::structure(format!(
            "Not required CSV files: {}",
            untracked.join(", ")
        )));
    }

    for required in REQUIRED_TENDER_FILES {
        if !names.contains(required) {
            return Err(Error::structure(format!(
                "The file {} is missing in directory {}",
                required,
                dir.display()
            )));
        }
    }

    check_version_sequence(VersionedFamily::Geokey, &names)?;
    check_version_sequence(VersionedFamily::Capacity, &names)?;

    let tender_files = build_tender_files(dir, &names)?;
    debug!(
        "Tender {}: {} geokey and {} capacity versions{}",
        tender_files.tender_id,
        tender_files.geokey_csvs.len(),
        tender_files.capacity_csvs.len(),
        if tender_files.province_csv.is_some() {
            ", with provinces"
        } else {
            ""
        }
    );
    Ok(tender_files)
}

fn is_tracked(name: &str) -> bool {
    REQUIRED_TENDER_FILES.contains(&name)
        || name == PROVINCE_FILE
        || VersionedFamily::Geokey.matches(name)
        || VersionedFamily::Capacity.matches(name)
}

fn build_tender_files(dir: &Path, names: &[&str]) -> Result<TenderFiles> {
    let tender_id = dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::structure(format!("Invalid tender directory name {}", dir.display()))
        })?
        .to_string();

    let resolve = |names: Vec<&str>| -> Vec<PathBuf> {
        names.into_iter().map(|name| dir.join(name)).collect()
    };

    Ok(TenderFiles {
        tender_id,
        tender_dir: dir.to_path_buf(),
        tender_csv: dir.join(TENDER_FILE),
        tender_costs_csv: dir.join(TENDER_COSTS_FILE),
        delivery_driver_csv: dir.join(DELIVERY_DRIVER_FILE),
        geokey_csvs: resolve(sorted_versions(VersionedFamily::Geokey, names)),
        capacity_csvs: resolve(sorted_versions(VersionedFamily::Capacity, names)),
        province_csv: names
            .contains(&PROVINCE_FILE)
            .then(|| dir.join(PROVINCE_FILE)),
    })
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::structure(format!(
            "The directory {} does not exist.",
            path.display()
        )));
    }
    Ok(())
}

/// Names of the direct children of `dir` accepted by `keep`, sorted
fn list_entries(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !keep(entry.path()) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
