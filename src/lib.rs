//! CSV to IIF Converter Library
//! # Overview
//!
//! This library converts transaction records from CSV files into the IIF
//! (Intuit Interchange Format) general journal layout imported by QuickBooks.
//! Every row is validated strictly; a conversion either writes a complete
//! output file or fails with a diagnostic naming the offending row and value.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Transaction types and errors
//! - [`io`] - I/O handling:
//!   - [`io::csv_reader`] - Column resolution and row validation
//!   - [`io::iif_format`] - IIF serialization
//!   - [`io::clean`] - CSV cleaning utility
//! - [`core`] - Conversion pipeline ([`core::converter`])
//! - [`cli`] - CLI arguments parsing and exit codes
//! - [`logging`] - `tracing` subscriber setup for the binary
//!
//! # Input Format
//!
//! The header row must contain, in any order and any letter case, the
//! columns `date`, `credit-account`, `debit-account`, `number`, `name`,
//! `amount` and `memo`. Extra columns are ignored.
//!
//! - `date`: `MM/DD/YYYY`
//! - `amount`: positive, optional leading `$` and `,` thousands separators
//! - `number` and `name` may be empty; all other columns may not
//!
//! # Output Format
//!
//! Each transaction becomes a TRNS line (debit account, positive amount), an
//! SPL line (credit account, negated amount) and an ENDTRNS line.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod types;

pub use crate::core::{convert, read_and_validate, Converter};
pub use io::{write_iif, CsvReader, IifWriter};
pub use types::{ConversionError, ErrorCategory, RawTransaction, Transaction, ValidationError};
