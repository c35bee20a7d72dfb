//! CSV cleaning utility
//!
//! Normalizes a CSV file without interpreting its contents as transactions:
//! header cells are trimmed and deduplicated case-insensitively, blank rows
//! are dropped, and every remaining cell is trimmed. Columns whose header was
//! dropped are removed from the data rows as well.

use crate::types::ConversionError;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Counts describing what a clean pass changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanSummary {
    /// Header columns kept in the output
    pub columns: usize,
    /// Header columns dropped as empty or duplicate
    pub dropped_columns: usize,
    /// Data rows written
    pub rows: usize,
    /// Blank data rows dropped
    pub dropped_rows: usize,
}

/// Clean CSV bytes, writing the result to `output`
pub fn clean_csv(
    contents: &[u8],
    output: &mut dyn Write,
) -> Result<CleanSummary, ConversionError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents);
    let mut records = reader.records();

    let header = records.next().ok_or(ConversionError::EmptyFile)??;

    let mut seen = HashSet::new();
    let kept: Vec<usize> = header
        .iter()
        .enumerate()
        .filter(|(_, cell)| {
            let name = cell.trim();
            !name.is_empty() && seen.insert(name.to_lowercase())
        })
        .map(|(index, _)| index)
        .collect();

    let mut summary = CleanSummary {
        columns: kept.len(),
        dropped_columns: header.len() - kept.len(),
        ..CleanSummary::default()
    };
    debug!(kept = ?kept, "Retained header columns");

    let mut writer = WriterBuilder::new().flexible(true).from_writer(output);
    writer.write_record(project(&header, &kept))?;

    for result in records {
        let record = result?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            summary.dropped_rows += 1;
            continue;
        }
        writer.write_record(project(&record, &kept))?;
        summary.rows += 1;
    }

    writer.flush()?;
    Ok(summary)
}

/// Trimmed cells of `record` at the `kept` positions that the record has
fn project<'r>(record: &'r StringRecord, kept: &'r [usize]) -> impl Iterator<Item = &'r str> {
    kept.iter()
        .filter_map(move |index| record.get(*index))
        .map(str::trim)
}

/// Clean the file at `input` and write the result to `output`
///
/// `output` may equal `input`: the cleaned data goes to a temporary file in
/// the same directory which then replaces the destination.
///
/// # Errors
///
/// - `FileNotFound` if `input` does not exist
/// - `EmptyFile` if `input` has no header row
/// - `Io` if the destination cannot be written
pub fn clean_file(input: &Path, output: &Path) -> Result<CleanSummary, ConversionError> {
    if !input.exists() {
        return Err(ConversionError::FileNotFound {
            path: input.display().to_string(),
        });
    }

    info!(input = %input.display(), output = %output.display(), "Cleaning CSV file");
    let contents = fs::read(input).map_err(|e| ConversionError::reading(input, e))?;

    let directory = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged =
        NamedTempFile::new_in(directory).map_err(|e| ConversionError::writing(output, e))?;
    let summary = clean_csv(&contents, staged.as_file_mut())?;
    staged
        .persist(output)
        .map_err(|e| ConversionError::writing(output, e.error))?;

    info!(
        rows = summary.rows,
        dropped_rows = summary.dropped_rows,
        dropped_columns = summary.dropped_columns,
        "Cleaned CSV written"
    );
    Ok(summary)
}
