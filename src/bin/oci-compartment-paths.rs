//! oci-compartment-paths CLI Binary
//!
//! Writes every compartment in the tenancy, with its full path and depth, to a CSV file.

use compartment_paths::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse_normalized();

    let context = match CliContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = context.init_logging() {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    match context.execute() {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            tracing::error!(error = %e, "Export failed");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
