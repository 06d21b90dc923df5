//! Stable single-column sorting.

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::types::{Row, SortDirection, SortSpec, Value};

/// Returns `rows` ordered by `spec`.
///
/// An empty sort column returns `rows` itself as [`Cow::Borrowed`]. Otherwise the rows are copied
/// and the copy is sorted; the input is never reordered.
///
/// When both cells are numbers they compare numerically. Any other pair compares the lowercased
/// string forms byte by byte; there is no locale collation, so accented letters and punctuation
/// order by code point. Descending order negates the comparison rather than reversing the result, so
/// rows with equal keys keep their input order in both directions.
pub fn sort<'a>(rows: &'a [Row], spec: &SortSpec) -> Cow<'a, [Row]> {
    if spec.is_noop() {
        return Cow::Borrowed(rows);
    }

    let mut out = rows.to_vec();
    out.sort_by(|a, b| {
        let ord = compare_cells(a.get(&spec.column), b.get(&spec.column));
        match spec.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    Cow::Owned(out)
}

/// Ascending comparison of two cells.
pub fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        _ => sort_key(a).cmp(&sort_key(b)),
    }
}

fn sort_key(cell: Option<&Value>) -> String {
    cell.map(|v| v.to_string().to_lowercase()).unwrap_or_default()
}
