//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Raw and validated transaction types
//! - `error`: Error types and boundary error categories

pub mod error;
pub mod transaction;

pub use error::{ConversionError, ErrorCategory, ValidationError};
pub use transaction::{RawTransaction, Transaction, DATE_FORMAT};
