//! Metric collectors for each resource category.
//!
//! Each collector drives one external reporting tool through the shared
//! [`CommandRunner`](crate::core::CommandRunner) and reshapes its row-column
//! output into uniform [`UsageRecord`](crate::core::UsageRecord)s. The
//! column layout of each tool's output is the input contract this module
//! encodes; everything downstream only sees the uniform record shape.

pub mod disk;
pub mod memory;
pub mod swap;

pub use disk::DiskCollector;
pub use memory::MemoryCollector;
pub use swap::SwapCollector;

use thiserror::Error;

/// A malformed row from an external reporting tool.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("expected {expected} fields, got {got}: {row:?}")]
    FieldCount {
        expected: usize,
        got: usize,
        row: Vec<String>,
    },
    #[error("field {field:?} is not numeric")]
    NotNumeric { field: String },
}

/// Parses the numeric prefix of a field, tolerating a trailing unit or
/// percent suffix ("2048" -> 2048, "100G" -> 100, "95%" -> 95).
///
/// `df -h` reports human-readable sizes; the leading digits are the value
/// in whatever unit the tool chose, which is all the record model requires
/// (unit consistency matters only within a category).
pub(crate) fn parse_field(field: &str) -> Result<u64, ParseError> {
    let digits: &str = field
        .find(|c: char| !c.is_ascii_digit())
        .map_or(field, |end| &field[..end]);
    digits.parse().map_err(|_| ParseError::NotNumeric {
        field: field.to_string(),
    })
}

/// Checks a row for the exact field count the tool's output contract promises.
pub(crate) fn expect_fields(row: &[String], expected: usize) -> Result<(), ParseError> {
    if row.len() != expected {
        return Err(ParseError::FieldCount {
            expected,
            got: row.len(),
            row: row.to_vec(),
        });
    }
    Ok(())
}
