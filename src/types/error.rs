//! Error types for the CSV to IIF converter
//!
//! This module defines all error types that can occur while reading, validating
//! and writing transactions. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! Every [`ConversionError`] belongs to one of four categories that the CLI
//! maps to exit codes:
//!
//! - **not-found**: The input file does not exist
//! - **invalid-input**: Empty file, missing columns, malformed rows or field values
//! - **io-error**: Output cannot be written, or other OS-level I/O faults
//! - **unexpected**: Anything else; treated as a defect rather than a user error

use std::fmt;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Failure to build a valid transaction from raw field values
///
/// Each variant carries the offending raw value so the message can be shown
/// to the user unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Date is not a real calendar date in `MM/DD/YYYY` form
    #[error("Invalid date format '{value}': expected MM/DD/YYYY")]
    InvalidDate { value: String },

    /// Amount could not be parsed as a decimal number
    #[error("Invalid amount '{value}'")]
    InvalidAmount { value: String },

    /// Amount parsed but is zero or negative
    #[error("Amount must be positive, got: {value}")]
    NonPositiveAmount { value: String },

    /// One or more required fields are blank
    #[error("Required fields cannot be empty: {}", fields.join(", "))]
    EmptyFields { fields: Vec<&'static str> },
}

/// Main error type for a conversion run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Input file not found at the specified path
    #[error("CSV file not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// Input file has no header row
    #[error("CSV file is empty")]
    EmptyFile,

    /// Header row lacks one or more required columns
    ///
    /// Columns are kept in alphabetical order.
    #[error("Missing required columns: {}", columns.join(", "))]
    MissingColumns {
        /// Names of the missing logical columns
        columns: Vec<String>,
    },

    /// A data row failed transaction validation
    #[error("Error in row {row}: {source}")]
    InvalidRow {
        /// Line number of the row in the source file
        row: u64,
        /// The underlying validation failure
        source: ValidationError,
    },

    /// A data row ends before a mapped column
    #[error("Error in row {row}: missing value for column '{column}'")]
    ShortRow {
        /// Line number of the row in the source file
        row: u64,
        /// Logical column with no cell in this row
        column: String,
    },

    /// Input could not be decoded as CSV
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Malformed {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// Failure outside every known category
    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

/// Boundary category of a [`ConversionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    NotFound,
    InvalidInput,
    Io,
    Unexpected,
}

impl ErrorCategory {
    /// Stable name used in diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::NotFound => "not-found",
            ErrorCategory::InvalidInput => "invalid-input",
            ErrorCategory::Io => "io-error",
            ErrorCategory::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConversionError {
    /// Category this error is reported under
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConversionError::FileNotFound { .. } => ErrorCategory::NotFound,
            ConversionError::EmptyFile
            | ConversionError::MissingColumns { .. }
            | ConversionError::InvalidRow { .. }
            | ConversionError::ShortRow { .. }
            | ConversionError::Malformed { .. } => ErrorCategory::InvalidInput,
            ConversionError::Io { .. } => ErrorCategory::Io,
            ConversionError::Unexpected { .. } => ErrorCategory::Unexpected,
        }
    }

    /// Create an error for a failed read of `path`
    ///
    /// A missing file maps to `FileNotFound`; every other kind to `Io`.
    pub fn reading(path: &Path, error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::NotFound {
            ConversionError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            ConversionError::Io {
                message: format!("Failed to read '{}': {}", path.display(), error),
            }
        }
    }

    /// Create an error for a failed write to `path`
    ///
    /// Always `Io`: a missing parent directory is not a missing input.
    pub fn writing(path: &Path, error: io::Error) -> Self {
        ConversionError::Io {
            message: format!("Failed to write '{}': {}", path.display(), error),
        }
    }

    /// Create a MissingColumns error, sorting the names
    pub fn missing_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        columns.sort();
        ConversionError::MissingColumns { columns }
    }

    /// Create an InvalidRow error
    pub fn invalid_row(row: u64, source: ValidationError) -> Self {
        ConversionError::InvalidRow { row, source }
    }
}

// Conversion from io::Error to ConversionError
impl From<io::Error> for ConversionError {
    fn from(error: io::Error) -> Self {
        ConversionError::Io {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to ConversionError
impl From<csv::Error> for ConversionError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        match error.kind() {
            csv::ErrorKind::Io(e) => ConversionError::Io {
                message: e.to_string(),
            },
            csv::ErrorKind::Utf8 { .. } | csv::ErrorKind::UnequalLengths { .. } => {
                ConversionError::Malformed {
                    line,
                    message: error.to_string(),
                }
            }
            _ => ConversionError::Unexpected {
                message: error.to_string(),
            },
        }
    }
}
