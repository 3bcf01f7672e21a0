//! Command implementations for the tender builder CLI
//!
//! The build command drives the whole pipeline; shared holds logging setup,
//! statistics and terminal reporting.

pub mod build;
pub mod shared;

pub use build::run_build;
pub use shared::{BuildStats, print_report, setup_logging};
