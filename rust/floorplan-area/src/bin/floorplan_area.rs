// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: estimate a building's floor area from a PDF floor plan
//!
//! Prints a single JSON document on stdout and exits with 0 on success, 1 on
//! any failure. Logs go to stderr (`RUST_LOG`, default `warn`).
//!
//! Usage:
//!   floorplan-area <pdf_path> [--scale 1:100] [--debug]

use clap::Parser;
use floorplan_area::{AreaCalculator, CalculatorConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "floorplan-area",
    version,
    about = "Calculate building area from PDF floor plans"
)]
struct Args {
    /// Path to the PDF file
    pdf_path: PathBuf,

    /// Drawing scale (e.g., 1:100)
    #[arg(long, default_value = "1:100")]
    scale: String,

    /// Write debug_outline.png with the detected outline
    #[arg(long)]
    debug: bool,

    /// Render resolution, overriding FLOORPLAN_AREA_DPI
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    dpi: Option<u32>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = CalculatorConfig::from_env();
    if let Some(dpi) = args.dpi {
        config.dpi = dpi;
    }

    let calculator = AreaCalculator::with_config(&args.pdf_path, &args.scale, args.debug, config);
    let outcome = calculator.calculate();

    match outcome.to_json_pretty() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize result");
            println!(
                "{}",
                serde_json::json!({
                    "success": false,
                    "error": e.to_string(),
                    "message": "Area calculation failed",
                })
            );
            return ExitCode::FAILURE;
        }
    }

    ExitCode::from(outcome.exit_code())
}
