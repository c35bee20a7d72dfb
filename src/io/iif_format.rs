//! IIF format handling for transaction output
//!
//! Renders validated transactions as a general journal IIF file: one fixed
//! declaration block followed by a TRNS/SPL/ENDTRNS block per transaction.
//!
//! ```text
//! !TRNS   TRNSID  TRNSTYPE  DATE  ACCNT  NAME  AMOUNT  DOCNUM  MEMO
//! !SPL    SPLID   TRNSTYPE  DATE  ACCNT  NAME  AMOUNT  DOCNUM  MEMO
//! !ENDTRNS
//! TRNS            GENERAL JOURNAL  <date>  <debit>   <name>  <amount>   <number>  <memo>
//! SPL             GENERAL JOURNAL  <date>  <credit>  <name>  -<amount>  <number>  <memo>
//! ENDTRNS
//! ```
//!
//! Columns are separated by a single tab and values are written verbatim.

use crate::types::{ConversionError, Transaction};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Transaction type written on every TRNS and SPL line
pub const TRANSACTION_TYPE: &str = "GENERAL JOURNAL";

/// Declaration lines written at the top of every file
pub const HEADER_LINES: [&[&str]; 3] = [
    &[
        "!TRNS", "TRNSID", "TRNSTYPE", "DATE", "ACCNT", "NAME", "AMOUNT", "DOCNUM", "MEMO",
    ],
    &[
        "!SPL", "SPLID", "TRNSTYPE", "DATE", "ACCNT", "NAME", "AMOUNT", "DOCNUM", "MEMO",
    ],
    &["!ENDTRNS"],
];

/// Marker closing each transaction block
pub const END_OF_BLOCK: &str = "ENDTRNS";

/// Fields of the TRNS line: the debit side at the positive amount
pub fn trns_fields(transaction: &Transaction) -> [String; 9] {
    line_fields(
        "TRNS",
        transaction,
        transaction.debit_account(),
        transaction.amount().to_string(),
    )
}

/// Fields of the SPL line: the credit side at the negated amount
pub fn spl_fields(transaction: &Transaction) -> [String; 9] {
    line_fields(
        "SPL",
        transaction,
        transaction.credit_account(),
        (-transaction.amount()).to_string(),
    )
}

fn line_fields(
    tag: &str,
    transaction: &Transaction,
    account: &str,
    amount: String,
) -> [String; 9] {
    [
        tag.to_string(),
        String::new(),
        TRANSACTION_TYPE.to_string(),
        transaction.date_text(),
        account.to_string(),
        transaction.name().to_string(),
        amount,
        transaction.number().to_string(),
        transaction.memo().to_string(),
    ]
}

/// Write transactions in IIF format
///
/// Writes the declaration lines, then one block per transaction in the
/// order given. An empty slice produces only the declaration lines.
///
/// # Arguments
///
/// * `transactions` - Validated transactions to write
/// * `output` - Mutable reference to a writer for the IIF text
pub fn write_iif(transactions: &[Transaction], output: &mut dyn Write) -> io::Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(output);

    for line in HEADER_LINES {
        writer.write_record(line)?;
    }

    for transaction in transactions {
        writer.write_record(&trns_fields(transaction))?;
        writer.write_record(&spl_fields(transaction))?;
        writer.write_record([END_OF_BLOCK])?;
    }

    writer.flush()
}

/// Writer for one output IIF file
#[derive(Debug, Clone)]
pub struct IifWriter {
    path: PathBuf,
}

impl IifWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create or overwrite the output file with `transactions`
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be created or written, including when
    /// its parent directory does not exist. A failed write may leave a
    /// partial file behind.
    pub fn write(&self, transactions: &[Transaction]) -> Result<(), ConversionError> {
        info!(
            count = transactions.len(),
            path = %self.path.display(),
            "Writing transactions to IIF file"
        );

        let file =
            File::create(&self.path).map_err(|e| ConversionError::writing(&self.path, e))?;
        let mut output = BufWriter::new(file);
        write_iif(transactions, &mut output)
            .and_then(|()| output.flush())
            .map_err(|e| ConversionError::writing(&self.path, e))?;

        info!("Successfully wrote IIF file");
        Ok(())
    }
}
