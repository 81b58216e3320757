//! Threshold evaluation over a cycle's collected records.

use crate::core::UsageRecord;

/// Selects the records flagged critical, preserving collection order
/// (memory first, then disk rows, then swap rows, as collected).
///
/// Pure function: no I/O, no side effects, same input yields same output.
pub fn critical_records(records: &[UsageRecord]) -> Vec<UsageRecord> {
    records
        .iter()
        .filter(|record| record.is_critical)
        .cloned()
        .collect()
}
