//! Transaction types for the CSV to IIF converter
//!
//! This module defines the raw text form of a transaction as read from the
//! input CSV and the validated `Transaction` value that the IIF writer consumes.
//! A `Transaction` can only be obtained through `TryFrom<RawTransaction>`, so
//! every instance in the program has already passed date, amount and
//! required-field validation.

use super::error::ValidationError;
use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

/// Date layout accepted on input and emitted on output
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Raw transaction fields as they appear in the input file
///
/// Field names follow the logical column names of the input header
/// (`credit-account`, `debit-account`, ...). Values are plain text and
/// carry no guarantees until converted into a [`Transaction`].
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct RawTransaction {
    pub date: String,
    #[serde(rename = "credit-account")]
    pub credit_account: String,
    #[serde(rename = "debit-account")]
    pub debit_account: String,
    pub number: String,
    pub name: String,
    pub amount: String,
    pub memo: String,
}

/// Validated journal transaction
///
/// Immutable once constructed. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    date: NaiveDate,
    credit_account: String,
    debit_account: String,
    number: String,
    name: String,
    amount: Decimal,
    memo: String,
}

impl Transaction {
    /// Transaction date
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Date rendered as `MM/DD/YYYY`
    pub fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Account credited by this transaction (written on the SPL line)
    pub fn credit_account(&self) -> &str {
        &self.credit_account
    }

    /// Account debited by this transaction (written on the TRNS line)
    pub fn debit_account(&self) -> &str {
        &self.debit_account
    }

    /// Reference (document) number, possibly empty
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Payee name, possibly empty
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positive amount with a scale of exactly two
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = ValidationError;

    /// Validate raw fields and build a `Transaction`
    ///
    /// Checks run in a fixed order: date, then amount, then required
    /// fields. An empty date therefore reports a date error rather than an
    /// empty-field error.
    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        let date = parse_date(&raw.date)?;
        let amount = parse_amount(&raw.amount)?;

        let required = [
            ("date", &raw.date),
            ("credit_account", &raw.credit_account),
            ("debit_account", &raw.debit_account),
            ("amount", &raw.amount),
            ("memo", &raw.memo),
        ];
        let empty: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();
        if !empty.is_empty() {
            return Err(ValidationError::EmptyFields { fields: empty });
        }

        Ok(Transaction {
            date,
            credit_account: raw.credit_account,
            debit_account: raw.debit_account,
            number: raw.number,
            name: raw.name,
            amount,
            memo: raw.memo,
        })
    }
}

/// Parse a `MM/DD/YYYY` date
///
/// Month and day must be zero-padded to two digits and the year must have
/// four digits. The value must also be a real calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate {
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())?;
    // Year 0000 parses but is not a real calendar year
    if date.year() < 1 {
        return Err(invalid());
    }
    Ok(date)
}

/// Parse and normalize a monetary amount
///
/// Accepts an optional leading `$` and `,` thousands separators. The result
/// is strictly positive and carries exactly two fraction digits. Values that
/// cannot be held exactly at that scale are invalid.
pub fn parse_amount(value: &str) -> Result<Decimal, ValidationError> {
    let invalid = || ValidationError::InvalidAmount {
        value: value.to_string(),
    };

    let trimmed = value.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let digits: String = unsigned.chars().filter(|c| *c != ',').collect();

    let plain_number = !digits.is_empty()
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));
    let parsed = if plain_number {
        Decimal::from_str_exact(&digits).ok()
    } else {
        None
    };
    let amount = parsed.ok_or_else(invalid)?;

    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount {
            value: value.to_string(),
        });
    }

    let mut normalized = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    normalized.rescale(2);
    // rescale keeps a smaller scale when the mantissa has no room for two digits
    if normalized.scale() != 2 {
        return Err(invalid());
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn raw(date: &str, amount: &str) -> RawTransaction {
        RawTransaction {
            date: date.to_string(),
            credit_account: "Checking".to_string(),
            debit_account: "Office Supplies".to_string(),
            number: "1001".to_string(),
            name: "Staples".to_string(),
            amount: amount.to_string(),
            memo: "Printer paper".to_string(),
        }
    }

    #[test]
    fn test_valid_transaction() {
        let tx = Transaction::try_from(raw("01/15/2024", "500.00")).unwrap();

        assert_eq!(tx.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(tx.date_text(), "01/15/2024");
        assert_eq!(tx.credit_account(), "Checking");
        assert_eq!(tx.debit_account(), "Office Supplies");
        assert_eq!(tx.number(), "1001");
        assert_eq!(tx.name(), "Staples");
        assert_eq!(tx.amount().to_string(), "500.00");
        assert_eq!(tx.memo(), "Printer paper");
    }

    #[rstest]
    #[case::plain("500", "500.00")]
    #[case::two_decimals("500.00", "500.00")]
    #[case::one_decimal("12.5", "12.50")]
    #[case::dollar_sign("$100.00", "100.00")]
    #[case::thousands("1,234.56", "1234.56")]
    #[case::dollar_and_thousands("$10,000,000.00", "10000000.00")]
    #[case::surrounding_whitespace("  42.10  ", "42.10")]
    #[case::small("0.01", "0.01")]
    #[case::extra_precision_rounds("10.005", "10.00")]
    #[case::extra_precision_rounds_up("10.015", "10.02")]
    #[case::widest_with_cents("12345678901234567890123456", "12345678901234567890123456.00")]
    fn test_amount_normalization(#[case] input: &str, #[case] expected: &str) {
        let tx = Transaction::try_from(raw("01/15/2024", input)).unwrap();
        assert_eq!(tx.amount().to_string(), expected);
    }

    #[rstest]
    #[case::zero("0")]
    #[case::zero_decimal("0.00")]
    #[case::negative("-100.00")]
    #[case::negative_with_dollar("$-5")]
    fn test_non_positive_amount(#[case] input: &str) {
        let err = Transaction::try_from(raw("01/15/2024", input)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonPositiveAmount {
                value: input.to_string()
            }
        );
        assert!(err.to_string().contains("must be positive"));
    }

    #[rstest]
    #[case::letters("abc")]
    #[case::empty("")]
    #[case::only_dollar("$")]
    #[case::two_dots("1.2.3")]
    #[case::trailing_currency("100 USD")]
    #[case::parentheses("(100.00)")]
    #[case::underscore("1_000")]
    #[case::double_dollar("$$100")]
    #[case::too_many_digits("100000000000000000000000000000")]
    #[case::largest_representable("79228162514264337593543950335")]
    #[case::no_room_for_cents("1234567890123456789012345678")]
    #[case::too_many_fraction_digits("0.00000000000000000000000000001")]
    fn test_invalid_amount(#[case] input: &str) {
        let err = Transaction::try_from(raw("01/15/2024", input)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidAmount {
                value: input.to_string()
            }
        );
        assert!(err.to_string().contains("Invalid amount"));
    }

    #[rstest]
    #[case::leap_day("02/29/2024")]
    #[case::year_end("12/31/1999")]
    #[case::first_day("01/01/0001")]
    fn test_valid_dates(#[case] input: &str) {
        let tx = Transaction::try_from(raw(input, "1.00")).unwrap();
        assert_eq!(tx.date_text(), input);
    }

    #[rstest]
    #[case::bad_month_and_day("13/45/2024")]
    #[case::iso("2024-01-15")]
    #[case::empty("")]
    #[case::not_leap_year("02/29/2023")]
    #[case::unpadded("1/15/2024")]
    #[case::two_digit_year("01/15/24")]
    #[case::dashes("01-15-2024")]
    #[case::year_zero("01/15/0000")]
    #[case::trailing_text("01/15/2024x")]
    fn test_invalid_dates(#[case] input: &str) {
        let err = Transaction::try_from(raw(input, "1.00")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDate {
                value: input.to_string()
            }
        );
    }

    #[test]
    fn test_date_checked_before_amount() {
        let err = Transaction::try_from(raw("bad", "abc")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let mut input = raw("01/15/2024", "10");
        input.number = String::new();
        input.name = String::new();

        let tx = Transaction::try_from(input).unwrap();
        assert_eq!(tx.number(), "");
        assert_eq!(tx.name(), "");
    }

    #[rstest]
    #[case::credit_account("credit_account")]
    #[case::debit_account("debit_account")]
    #[case::memo("memo")]
    fn test_required_field_empty(#[case] field: &'static str) {
        let mut input = raw("01/15/2024", "10");
        match field {
            "credit_account" => input.credit_account = "   ".to_string(),
            "debit_account" => input.debit_account = String::new(),
            "memo" => input.memo = String::new(),
            _ => panic!("Unknown field: {}", field),
        }

        let err = Transaction::try_from(input).unwrap_err();
        assert_eq!(err, ValidationError::EmptyFields { fields: vec![field] });
        assert!(err.to_string().contains(field));
    }

    #[test]
    fn test_all_empty_required_fields_reported() {
        let mut input = raw("01/15/2024", "10");
        input.credit_account = String::new();
        input.memo = String::new();

        let err = Transaction::try_from(input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Required fields cannot be empty: credit_account, memo"
        );
    }
}
