//! Conversion pipeline
//!
//! The converter composes [`CsvReader`] and [`IifWriter`] for a single
//! input/output pair. It holds no validation or formatting logic of its own
//! and surfaces errors from either stage unchanged.
//!
//! # Design
//!
//! The whole input is read and validated before the output file is opened,
//! so an invalid input never truncates an existing output file.
//!
//! ```no_run
//! use csv2iif::core::Converter;
//!
//! let count = Converter::new("transactions.csv", "transactions.iif")
//!     .convert()
//!     .expect("Conversion failed");
//! println!("Converted {} transactions", count);
//! ```

use crate::io::{CsvReader, IifWriter};
use crate::types::ConversionError;
use std::path::Path;
use tracing::info;

/// Converter for one input CSV and one output IIF file
#[derive(Debug, Clone)]
pub struct Converter {
    reader: CsvReader,
    writer: IifWriter,
}

impl Converter {
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            reader: CsvReader::new(input.as_ref()),
            writer: IifWriter::new(output.as_ref()),
        }
    }

    /// Read, validate and write all transactions
    ///
    /// # Returns
    ///
    /// The number of transactions written.
    ///
    /// # Errors
    ///
    /// Any error from reading (not-found, invalid-input) or writing (io-error).
    pub fn convert(&self) -> Result<usize, ConversionError> {
        info!(
            input = %self.reader.path().display(),
            output = %self.writer.path().display(),
            "Starting conversion"
        );

        let transactions = self.reader.read()?;
        self.writer.write(&transactions)?;

        info!(count = transactions.len(), "Conversion completed successfully");
        Ok(transactions.len())
    }
}

/// Convert `input` CSV into `output` IIF, returning the transaction count
pub fn convert(input: &Path, output: &Path) -> Result<usize, ConversionError> {
    Converter::new(input, output).convert()
}

/// Validate `input` CSV, returning the transaction count
pub fn read_and_validate(input: &Path) -> Result<usize, ConversionError> {
    let transactions = CsvReader::new(input).read()?;
    info!(count = transactions.len(), "Validation successful");
    Ok(transactions.len())
}
