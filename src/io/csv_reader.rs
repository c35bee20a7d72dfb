//! CSV reader with header-driven column resolution
//!
//! Reads an entire input file into memory, resolves the required logical
//! columns from its header row and converts every non-blank data row into a
//! validated [`Transaction`].
//!
//! # Column Resolution
//!
//! Header cells are matched case-insensitively after trimming, so columns may
//! appear in any order and alongside unrelated extra columns. When a name
//! appears more than once, the first occurrence wins.
//!
//! # Error Handling
//!
//! Reading is fail-fast: the first invalid row aborts the whole read. Row
//! numbers in errors are physical line numbers in the source file, so blank
//! lines that were skipped still count.
//!
//! ```no_run
//! use csv2iif::io::csv_reader::CsvReader;
//!
//! let transactions = CsvReader::new("transactions.csv").read().unwrap();
//! println!("Read {} transactions", transactions.len());
//! ```

use crate::types::{ConversionError, RawTransaction, Transaction};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Logical column names every input file must provide
///
/// The order here is the field order of [`RawTransaction`].
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "date",
    "credit-account",
    "debit-account",
    "number",
    "name",
    "amount",
    "memo",
];

/// Normalize a header cell for matching: trimmed and lowercased
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Position of each required logical column in the input rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    indices: [usize; REQUIRED_COLUMNS.len()],
    /// Logical names used to deserialize projected rows
    fields: StringRecord,
}

impl ColumnMapping {
    /// Build a mapping from the cells of a header row
    ///
    /// # Errors
    ///
    /// Returns `MissingColumns` listing every required column that is absent.
    pub fn from_headers<'a, I>(headers: I) -> Result<Self, ConversionError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (index, header) in headers.into_iter().enumerate() {
            let normalized = normalize_header(header);
            if !normalized.is_empty() {
                positions.entry(normalized).or_insert(index);
            }
        }

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !positions.contains_key(*column))
            .collect();
        if !missing.is_empty() {
            return Err(ConversionError::missing_columns(missing));
        }

        let mut indices = [0; REQUIRED_COLUMNS.len()];
        for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = positions[column];
        }
        Ok(Self {
            indices,
            fields: StringRecord::from(REQUIRED_COLUMNS.to_vec()),
        })
    }

    /// Zero-based position of a logical column, if it is a required column
    pub fn index_of(&self, column: &str) -> Option<usize> {
        REQUIRED_COLUMNS
            .iter()
            .position(|name| *name == column)
            .map(|slot| self.indices[slot])
    }

    /// Iterate `(logical name, position)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        REQUIRED_COLUMNS.iter().copied().zip(self.indices.iter().copied())
    }

    /// Pick the required cells out of a data row, trimmed
    ///
    /// `row` is the source line number used in errors.
    ///
    /// # Errors
    ///
    /// Returns `ShortRow` naming the first required column the record is
    /// too short to contain.
    pub fn extract(
        &self,
        record: &StringRecord,
        row: u64,
    ) -> Result<RawTransaction, ConversionError> {
        let mut projected =
            StringRecord::with_capacity(record.as_slice().len(), self.indices.len());
        for (column, index) in self.iter() {
            let cell = record.get(index).ok_or_else(|| ConversionError::ShortRow {
                row,
                column: column.to_string(),
            })?;
            projected.push_field(cell.trim());
        }

        Ok(projected.deserialize(Some(&self.fields))?)
    }
}

/// Reader for one input CSV file
#[derive(Debug, Clone)]
pub struct CsvReader {
    path: PathBuf,
}

impl CsvReader {
    /// Create a reader for the file at `path`
    ///
    /// The file is not opened until [`CsvReader::read`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate every transaction in the file
    ///
    /// # Errors
    ///
    /// - `FileNotFound` if the path does not exist
    /// - `EmptyFile` if there is no header row
    /// - `MissingColumns` if required columns are absent
    /// - `InvalidRow` / `ShortRow` for the first invalid data row
    /// - `Malformed` if the file is not valid UTF-8 CSV
    pub fn read(&self) -> Result<Vec<Transaction>, ConversionError> {
        if !self.path.exists() {
            return Err(ConversionError::FileNotFound {
                path: self.path.display().to_string(),
            });
        }

        info!(path = %self.path.display(), "Reading CSV file");
        let contents =
            fs::read(&self.path).map_err(|e| ConversionError::reading(&self.path, e))?;
        let transactions = parse_transactions(&contents)?;
        info!(count = transactions.len(), "Successfully read transactions");

        Ok(transactions)
    }
}

/// Parse CSV bytes into validated transactions
///
/// This is the in-memory core of [`CsvReader::read`].
pub fn parse_transactions(contents: &[u8]) -> Result<Vec<Transaction>, ConversionError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents);
    let mut records = reader.records();

    let mut lines = LineTracker::new(contents);
    let header = records.next().ok_or(ConversionError::EmptyFile)??;
    lines.advance_to(&header);
    let mapping = ColumnMapping::from_headers(header.iter())?;
    let columns: Vec<(&str, usize)> = mapping.iter().collect();
    debug!(?columns, "Resolved column mapping");

    let mut transactions = Vec::new();
    for result in records {
        let record = result?;
        let row = lines.advance_to(&record);

        if is_blank(&record) {
            debug!(row, "Skipping blank row");
            continue;
        }

        let raw = mapping.extract(&record, row)?;
        let transaction =
            Transaction::try_from(raw).map_err(|e| ConversionError::invalid_row(row, e))?;
        transactions.push(transaction);
    }

    Ok(transactions)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

/// Physical line numbers of records, tracked incrementally
///
/// The csv reader skips empty lines and accepts `\n`, `\r\n` and a lone `\r`
/// as terminators. Every record start is mapped back to its line by counting
/// the terminators in front of it, whatever their flavor.
struct LineTracker<'a> {
    contents: &'a [u8],
    offset: usize,
    line: u64,
}

impl<'a> LineTracker<'a> {
    fn new(contents: &'a [u8]) -> Self {
        Self {
            contents,
            offset: 0,
            line: 1,
        }
    }

    /// Line on which `record` starts
    ///
    /// Records must be passed in file order.
    fn advance_to(&mut self, record: &StringRecord) -> u64 {
        let Some(position) = record.position() else {
            return self.line;
        };
        let reported = usize::try_from(position.byte())
            .unwrap_or(self.contents.len())
            .min(self.contents.len());
        // The reported position may precede the empty lines that were skipped
        let start = reported
            + self.contents[reported..]
                .iter()
                .take_while(|b| matches!(b, b'\r' | b'\n'))
                .count();

        if start > self.offset {
            self.line += count_line_breaks(&self.contents[self.offset..start]);
            self.offset = start;
        }
        self.line
    }
}

/// Number of line breaks, counting `\r\n` once
fn count_line_breaks(bytes: &[u8]) -> u64 {
    let mut count = 0;
    let mut iter = bytes.iter().peekable();
    while let Some(byte) = iter.next() {
        match byte {
            b'\n' => count += 1,
            b'\r' => {
                count += 1;
                iter.next_if_eq(&&b'\n');
            }
            _ => {}
        }
    }
    count
}
