//! Shared components for CLI commands
//!
//! Logging setup, build statistics, progress bars and the final report.

use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::app::models::TenderBundle;
use crate::constants::entities;

/// Statistics of one build run
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of environment directories validated
    pub environments_processed: usize,
    /// Number of tender directories built
    pub tenders_built: usize,
    /// Records produced per output entity
    pub records_per_entity: BTreeMap<&'static str, usize>,
    /// Archive written, `None` for dry runs
    pub archive_path: Option<PathBuf>,
    /// Number of files stored in the archive
    pub archive_entries: usize,
    /// Size of the archive in bytes
    pub archive_size: u64,
    /// Wall-clock time of the build
    pub processing_time: Duration,
}

impl BuildStats {
    /// Add the record counts of one tender bundle
    pub fn record_bundle(&mut self, bundle: &TenderBundle) {
        self.tenders_built += 1;
        self.add_records(entities::TENDER, 1);
        self.add_records(entities::COST, bundle.tender_costs.len());
        self.add_records(entities::GEOKEY, bundle.geokeys.len());
        self.add_records(entities::DELIVERY_DRIVER, bundle.delivery_drivers.len());
        self.add_records(entities::CAPACITY, bundle.capacities.len());
        if let Some(provinces) = &bundle.provinces {
            self.add_records(entities::PROVINCE, provinces.len());
        }
    }

    fn add_records(&mut self, entity: &'static str, count: usize) {
        *self.records_per_entity.entry(entity).or_default() += count;
    }

    /// Total records over every entity
    pub fn total_records(&self) -> usize {
        self.records_per_entity.values().sum()
    }

    /// Format a byte count in human-readable form
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Set up structured logging
///
/// `RUST_LOG` takes precedence over the level derived from the CLI flags.
/// Calling this twice is harmless; the second subscriber is ignored.
pub fn setup_logging(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tender_builder={}", log_level)));

    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .is_ok();

    if initialized {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// Progress bar over `total` tenders, hidden when `visible` is false
pub fn create_progress_bar(total: u64, message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print the final build report to stdout
pub fn print_report(stats: &BuildStats) {
    println!("\n{}", "Tender Build Summary".bright_green().bold());
    println!("{}", "=".repeat(40));
    println!(
        "Environments: {}",
        stats.environments_processed.to_string().bright_white().bold()
    );
    println!(
        "Tenders:      {}",
        stats.tenders_built.to_string().bright_white().bold()
    );

    if !stats.records_per_entity.is_empty() {
        println!("\n{}", "Records".bright_cyan().bold());
        for (entity, count) in &stats.records_per_entity {
            println!("  {:<36} {}", entity, count);
        }
        println!(
            "  {:<36} {}",
            "total",
            stats.total_records().to_string().bright_white().bold()
        );
    }

    match &stats.archive_path {
        Some(path) => println!(
            "\nArchive: {} ({} entries, {})",
            path.display().to_string().bright_yellow(),
            stats.archive_entries,
            BuildStats::format_size(stats.archive_size)
        ),
        None => println!("\n{}", "Dry run: nothing written".bright_yellow()),
    }

    println!("Completed in {}", HumanDuration(stats.processing_time));
}
