// CLI module
// Command-line interface, command dispatch and exit codes

mod args;

pub use args::{CleanArgs, CliArgs, Command, ConvertArgs, ValidateArgs};

use crate::core::{convert, read_and_validate};
use crate::io::clean_file;
use crate::types::{ConversionError, ErrorCategory};
use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (e.g., invalid arguments, missing required arguments, or
/// --help flag), clap will display an error message or help text and exit
/// the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Process exit code for an error category
///
/// - 1: invalid input
/// - 2: file not found or I/O error
/// - 3: unexpected error
pub fn exit_code(category: ErrorCategory) -> i32 {
    match category {
        ErrorCategory::InvalidInput => 1,
        ErrorCategory::NotFound | ErrorCategory::Io => 2,
        ErrorCategory::Unexpected => 3,
    }
}

/// Line printed to stderr when a command fails
pub fn failure_line(error: &ConversionError) -> String {
    format!("Error: {}", error)
}

/// Run a command, returning the line to report on success
pub fn run(command: &Command) -> Result<String, ConversionError> {
    match command {
        Command::Convert(args) => {
            let count = convert(&args.input, &args.output)?;
            Ok(format!(
                "✓ Converted {} transactions to {}",
                count,
                args.output.display()
            ))
        }
        Command::Validate(args) => {
            let count = read_and_validate(&args.input)?;
            Ok(format!("✓ CSV is valid: {} transactions", count))
        }
        Command::Clean(args) => {
            let destination = args.destination();
            clean_file(&args.input, destination)?;
            if args.in_place {
                Ok(format!("✓ Cleaned CSV in place: {}", destination.display()))
            } else {
                Ok(format!("✓ Cleaned CSV written to {}", destination.display()))
            }
        }
    }
}
