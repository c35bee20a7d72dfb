//! I/O module
//!
//! Handles CSV input, IIF output and CSV cleaning.
//!
//! # Components
//!
//! - `csv_reader` - Column resolution and row validation for input CSV files
//! - `iif_format` - IIF serialization of validated transactions
//! - `clean` - Header deduplication and blank-row removal for CSV files

pub mod clean;
pub mod csv_reader;
pub mod iif_format;

pub use clean::{clean_csv, clean_file, CleanSummary};
pub use csv_reader::{parse_transactions, ColumnMapping, CsvReader, REQUIRED_COLUMNS};
pub use iif_format::{write_iif, IifWriter};
