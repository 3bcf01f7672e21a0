//! Build command implementation
//!
//! Validates the whole input tree, builds every tender bundle, and only then
//! writes the staging tree and the zip archive. A failure anywhere aborts the
//! run before anything is written.

use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{debug, info};

use super::shared::{BuildStats, create_progress_bar};
use crate::app::models::{EnvironmentTenders, TenderBundle};
use crate::app::services::bundle_writer::{BundleWriter, archive_directory};
use crate::app::services::tender_builder::build_tender;
use crate::app::services::tender_structure::validate_root;
use crate::config::Config;
use crate::constants::STAGING_DIR_PREFIX;

/// Bundles of one environment, in tender id order
struct EnvironmentBundles {
    environment: String,
    bundles: Vec<TenderBundle>,
}

/// Run a full build as described by `config`
pub fn run_build(config: &Config) -> Result<BuildStats> {
    let start_time = Instant::now();

    config.validate().context("Invalid configuration")?;
    debug!("Build configuration: {:?}", config);

    let environments = validate_root(&config.input_root).with_context(|| {
        format!(
            "Invalid tender directory structure in {}",
            config.input_root.display()
        )
    })?;

    let mut stats = BuildStats {
        environments_processed: environments.len(),
        ..Default::default()
    };

    let built = build_environments(&environments, config.show_progress)?;
    for environment in &built {
        for bundle in &environment.bundles {
            stats.record_bundle(bundle);
        }
    }
    info!(
        "Built {} tenders with {} records",
        stats.tenders_built,
        stats.total_records()
    );

    if config.dry_run {
        info!("Dry run: skipping staging and archive output");
        stats.processing_time = start_time.elapsed();
        return Ok(stats);
    }

    // Held until the archive is written; dropping it removes the tree
    let temp_staging;
    let staging_root = match &config.staging_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create staging directory {}", dir.display())
            })?;
            dir.clone()
        }
        None => {
            temp_staging = tempfile::Builder::new()
                .prefix(STAGING_DIR_PREFIX)
                .tempdir()
                .context("Failed to create temporary staging directory")?;
            temp_staging.path().to_path_buf()
        }
    };

    let writer = BundleWriter::new(&staging_root, config.record_format);
    for environment in &built {
        for bundle in &environment.bundles {
            writer
                .write_bundle(&environment.environment, bundle)
                .with_context(|| {
                    format!(
                        "Failed to write tender {} of environment {}",
                        bundle.tender_id, environment.environment
                    )
                })?;
        }
    }

    let summary = archive_directory(&staging_root, &config.out_file)
        .with_context(|| format!("Failed to write archive {}", config.out_file.display()))?;
    info!(
        "Archive {} written with {} entries",
        config.out_file.display(),
        summary.entries
    );

    stats.archive_path = Some(config.out_file.clone());
    stats.archive_entries = summary.entries;
    stats.archive_size = summary.bytes;
    stats.processing_time = start_time.elapsed();
    Ok(stats)
}

/// Build every tender of every environment, stopping at the first failure
fn build_environments(
    environments: &[EnvironmentTenders],
    show_progress: bool,
) -> Result<Vec<EnvironmentBundles>> {
    let total: usize = environments.iter().map(|env| env.tenders.len()).sum();
    let pb = create_progress_bar(total as u64, "Building tenders", show_progress);

    let mut built = Vec::with_capacity(environments.len());
    for environment in environments {
        info!(
            "Processing environment {} ({} tenders)",
            environment.environment,
            environment.tenders.len()
        );

        let mut bundles = Vec::with_capacity(environment.tenders.len());
        for files in &environment.tenders {
            pb.set_message(format!("{}/{}", environment.environment, files.tender_id));
            let bundle = build_tender(files).with_context(|| {
                format!(
                    "Failed to build tender {} of environment {}",
                    files.tender_id, environment.environment
                )
            });
            let bundle = match bundle {
                Ok(bundle) => bundle,
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            };
            info!(
                "Tender {}/{} built with {} records",
                environment.environment,
                bundle.tender_id,
                bundle.record_count()
            );
            bundles.push(bundle);
            pb.inc(1);
        }

        built.push(EnvironmentBundles {
            environment: environment.environment.clone(),
            bundles,
        });
    }

    pb.finish_and_clear();
    Ok(built)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::bundle_writer::RecordFormat;
    use crate::app::services::tender_structure::tests::{create_root, create_tender, valid_tender_files};
    use tempfile::TempDir;

    #[test]
    fn test_build_writes_archive() {
        let root = create_root();
        create_tender(&root.path().join("dev"), "20240101", &valid_tender_files());
        create_tender(&root.path().join("prod"), "20240101", &valid_tender_files());
        let out_dir = TempDir::new().unwrap();
        let out_file = out_dir.path().join("tender.zip");

        let config = Config::for_root(root.path())
            .with_out_file(&out_file)
            .without_progress();
        let stats = run_build(&config).unwrap();

        assert_eq!(stats.environments_processed, 5);
        assert_eq!(stats.tenders_built, 2);
        assert_eq!(stats.archive_path.as_deref(), Some(out_file.as_path()));
        // Five entity files per tender, no province file
        assert_eq!(stats.archive_entries, 10);
        assert!(out_file.exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let root = create_root();
        create_tender(&root.path().join("uat"), "20240101", &valid_tender_files());
        let out_dir = TempDir::new().unwrap();
        let out_file = out_dir.path().join("tender.zip");

        let config = Config::for_root(root.path())
            .with_out_file(&out_file)
            .with_dry_run()
            .without_progress();
        let stats = run_build(&config).unwrap();

        assert_eq!(stats.tenders_built, 1);
        assert!(stats.archive_path.is_none());
        assert!(!out_file.exists());
    }

    #[test]
    fn test_kept_staging_tree() {
        let root = create_root();
        create_tender(&root.path().join("test"), "20240101", &valid_tender_files());
        let out_dir = TempDir::new().unwrap();
        let staging = out_dir.path().join("staging");

        let config = Config::for_root(root.path())
            .with_out_file(out_dir.path().join("tender.zip"))
            .with_staging_dir(&staging)
            .with_record_format(RecordFormat::Plain)
            .without_progress();
        run_build(&config).unwrap();

        let tender_file = staging.join("test/20240101/pn-PaperChannelTender.json");
        let content = std::fs::read_to_string(tender_file).unwrap();
        let record: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(record["tenderId"], "20240101");
    }

    #[test]
    fn test_stale_staging_tree_is_not_archived() {
        let root = create_root();
        let out_dir = TempDir::new().unwrap();
        let out_file = out_dir.path().join("tender.zip");
        let stale = out_dir.path().join("staging/prod/19990101");
        std::fs::create_dir_all(&stale).unwrap();
        std::fs::write(stale.join("pn-PaperChannelTender.json"), "{\"stale\":1}").unwrap();

        let config = Config::for_root(root.path())
            .with_out_file(&out_file)
            .with_staging_dir(out_dir.path().join("staging"))
            .without_progress();
        let error = run_build(&config).unwrap_err();

        assert!(format!("{:#}", error).contains("Staging directory is not empty"));
        assert!(!out_file.exists());
    }

    #[test]
    fn test_invalid_tender_aborts_before_output() {
        let root = create_root();
        create_tender(&root.path().join("dev"), "20240101", &valid_tender_files());
        create_tender(
            &root.path().join("prod"),
            "20240202",
            &[("Tender.csv", "activationDate;tenderName\n")],
        );
        let out_dir = TempDir::new().unwrap();
        let out_file = out_dir.path().join("tender.zip");

        let config = Config::for_root(root.path())
            .with_out_file(&out_file)
            .without_progress();
        assert!(run_build(&config).is_err());
        assert!(!out_file.exists());
    }
}
