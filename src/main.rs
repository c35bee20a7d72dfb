//! csv2iif CLI
//!
//! Command-line interface for converting transaction CSV files into IIF
//! general journal files for QuickBooks.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- convert transactions.csv transactions.iif
//! cargo run -- transactions.csv transactions.iif --verbose
//! cargo run -- validate transactions.csv
//! cargo run -- clean raw.csv cleaned.csv
//! cargo run -- clean --in-place raw.csv
//! ```
//!
//! # Logging
//!
//! Logs and errors go to stderr. `--verbose` selects debug level, otherwise the
//! `LOG_LEVEL` environment variable is used (default: info).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Invalid input (empty file, missing columns, invalid row)
//! - 2: File not found or I/O error
//! - 3: Unexpected error

use clap::CommandFactory;
use csv2iif::cli;
use csv2iif::logging::{init_logging, LogConfig};
use std::io::{self, IsTerminal};
use std::process;
use tracing::error;

fn main() {
    let args = cli::parse_args();

    let config = LogConfig::from_env(args.verbose).with_ansi(io::stderr().is_terminal());
    let logging = init_logging(&config);
    if let Err(e) = &logging {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let Some(command) = args.into_command() else {
        // Reached only with flags and no paths, e.g. `csv2iif -v`
        let _ = cli::CliArgs::command().print_help();
        process::exit(1);
    };

    match cli::run(&command) {
        Ok(message) => println!("{}", message),
        Err(e) => {
            let category = e.category();
            if logging.is_ok() {
                error!(%category, "{}", e);
            }
            eprintln!("{}", cli::failure_line(&e));
            process::exit(cli::exit_code(category));
        }
    }
}
