//! Delimited-text parsing with per-cell type inference.

use crate::numeric::whole_number;
use crate::types::{ColumnType, Row, Value};

use super::observability::{IngestionObserver, SkippedRow, StdErrObserver};

/// Field delimiter.
pub const DELIMITER: char = ',';

/// Parse comma-separated text into rows, reporting dropped lines to stderr.
///
/// See [`parse_with_observer`] for the rules.
pub fn parse(text: &str) -> Vec<Row> {
    parse_with_observer(text, &StdErrObserver)
}

/// Parse comma-separated text into rows, reporting dropped lines to `observer`.
///
/// Rules:
///
/// - The whole input is trimmed, then split on `\n`. Fewer than two lines (no data) yields no rows.
/// - Line 1 is the header; each name is trimmed. Duplicate names are kept as-is, so the later
///   field overwrites the earlier one in the row.
/// - Every other line is split on `,` and each field trimmed. A line whose field count differs
///   from the header's is dropped whole and reported via [`IngestionObserver::on_row_skipped`].
/// - A field becomes [`Value::Number`] when it is non-empty and wholly a finite numeric literal,
///   otherwise [`Value::Text`]. Empty fields stay empty text.
///
/// Quoting is not supported: a comma inside a field shifts the remaining fields and normally
/// trips the field-count check.
pub fn parse_with_observer(text: &str, observer: &dyn IngestionObserver) -> Vec<Row> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = text.split('\n');
    let headers: Vec<&str> = match lines.next() {
        Some(line) => line.split(DELIMITER).map(str::trim).collect(),
        None => return Vec::new(),
    };

    let mut rows = Vec::new();
    for (idx0, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split(DELIMITER).map(str::trim).collect();
        if fields.len() != headers.len() {
            observer.on_row_skipped(&SkippedRow {
                line: idx0 + 1,
                found: fields.len(),
                expected: headers.len(),
            });
            continue;
        }

        let mut row = Row::with_capacity(headers.len());
        for (header, field) in headers.iter().zip(fields) {
            row.insert(*header, coerce_cell(field));
        }
        rows.push(row);
    }
    rows
}

/// Type a single trimmed field.
pub fn coerce_cell(field: &str) -> Value {
    match whole_number(field) {
        Some(n) => Value::Number(n),
        None => Value::Text(field.to_owned()),
    }
}

/// Column names of the first row, in header order. Empty for an empty dataset.
pub fn column_names(rows: &[Row]) -> Vec<String> {
    match rows.first() {
        Some(row) => row.columns().map(str::to_owned).collect(),
        None => Vec::new(),
    }
}

/// Type of `column`, judged from the first row alone.
///
/// Returns [`ColumnType::String`] for an empty dataset or an unknown column.
pub fn column_type(rows: &[Row], column: &str) -> ColumnType {
    match rows.first().and_then(|row| row.get(column)) {
        Some(Value::Number(_)) => ColumnType::Number,
        _ => ColumnType::String,
    }
}
