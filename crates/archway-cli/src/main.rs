//! Archway CLI entry point.

use std::process;

use clap::Parser;
use log::{LevelFilter, debug, error, info};
use miette::GraphicalReportHandler;

use archway_cli::{Args, error_adapter::render_reports};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    // Logging must be up before the config search runs.
    let log_level = args.log_filter().unwrap_or_else(|| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Archway");
    debug!(args:?; "Parsed arguments");

    match archway_cli::run(&args) {
        Ok(()) => info!(output_file = args.output; "Completed successfully"),
        Err(err) => {
            let reports = render_reports(&err, &GraphicalReportHandler::new());
            for report in &reports {
                error!("{report}");
            }
            debug!(reports_len = reports.len(); "Archway failed");
            process::exit(1);
        }
    }
}
