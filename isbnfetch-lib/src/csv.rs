//! Composes book records into lines of a CSV report.
//!
//! The report is keyed by a caller-chosen list of field names: the header is
//! that list joined with commas and every row holds the record's values in
//! the same order. Cells are quoted per RFC 4180 only when they need to be,
//! so a re-parse of any cell yields the original value.

use crate::BookRecord;

/// The header line for a report over the given field names.
#[must_use]
pub fn header(tags: &[String]) -> String {
    tags.join(",")
}

/// One report row for `record`, one cell per tag in the given order.
///
/// A field the record does not carry renders as an empty cell.
#[must_use]
pub fn row(record: &BookRecord, tags: &[String]) -> String {
    tags.iter()
        .map(|tag| escape(&record.field_text(tag).unwrap_or_default()))
        .collect::<Vec<_>>()
        .join(",")
}

fn escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_owned()
    }
}
