//! Writing rows and aggregation results back out.

use std::io::Write;

use crate::error::ExplorerResult;
use crate::ingestion::column_names;
use crate::types::{AggregationResult, Row};

/// Write `rows` as CSV, using the first row's columns as the header.
///
/// Fields that need it are quoted, so the output is valid RFC 4180 even though the parser itself
/// does not understand quoting. Cells missing from a row are written empty. Nothing is written
/// for an empty input.
pub fn write_csv<W: Write>(rows: &[Row], writer: W) -> ExplorerResult<()> {
    let columns = column_names(rows);
    if columns.is_empty() {
        return Ok(());
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&columns)?;
    for row in rows {
        wtr.write_record(
            columns
                .iter()
                .map(|c| row.get(c).map(|v| v.to_string()).unwrap_or_default()),
        )?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render `rows` as CSV text.
pub fn to_csv_string(rows: &[Row]) -> ExplorerResult<String> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    // The writer only ever receives `String` fields.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Render `rows` as a JSON array of objects, keys in column order.
pub fn to_json(rows: &[Row]) -> ExplorerResult<String> {
    Ok(serde_json::to_string(rows)?)
}

/// Render aggregation results as a JSON array.
pub fn aggregation_to_json(results: &[AggregationResult]) -> ExplorerResult<String> {
    Ok(serde_json::to_string(results)?)
}
