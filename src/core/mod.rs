//! Core conversion module
//!
//! This module contains the pipeline orchestration:
//! - `converter` - Sequences the CSV reader into the IIF writer

pub mod converter;

pub use converter::{convert, read_and_validate, Converter};
