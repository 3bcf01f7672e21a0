use anyhow::Context;
use clap::Parser;
use std::process;
use tender_builder::cli::args::Args;
use tender_builder::cli::commands::{BuildStats, print_report, run_build, setup_logging};
use tender_builder::config::Config;
use tracing::info;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    setup_logging(args.get_log_level());

    match run(&args) {
        Ok(stats) => {
            if args.show_progress() {
                print_report(&stats);
            }
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<BuildStats> {
    let config = Config::from_args(args).context("Invalid command line arguments")?;
    info!("Building tenders from {}", config.input_root.display());
    run_build(&config)
}
