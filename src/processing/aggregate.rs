//! Group-by with count/sum/average summaries.

use crate::types::{AggregationResult, Row, Value};

use super::group::{group_by, GroupKey};

/// Group `rows` by the `group_by` column and summarize each group.
///
/// - Returns an empty result when `group_by` is empty.
/// - Groups appear in the order their key is first encountered in `rows`. Rows lacking the
///   column fall into a single [`Value::Null`] group.
/// - `count` counts every member row.
/// - With an `aggregate_column`, `sum` and `average` cover only the members whose cell in that
///   column is a number; `average` divides by that numeric count, not by `count`. A group with
///   no numeric values gets neither.
pub fn aggregate(rows: &[Row], group_by_column: &str, aggregate_column: Option<&str>) -> Vec<AggregationResult> {
    if group_by_column.is_empty() {
        return Vec::new();
    }
    let aggregate_column = aggregate_column.filter(|c| !c.is_empty());

    group_by(rows, |row| GroupKey(row.get(group_by_column).cloned().unwrap_or(Value::Null)))
        .into_iter()
        .map(|(key, members)| {
            let (sum, average) = match aggregate_column {
                Some(column) => numeric_totals(&members, column),
                None => (None, None),
            };
            AggregationResult {
                group_by: group_by_column.to_owned(),
                value: key.into_value(),
                count: members.len(),
                sum,
                average,
            }
        })
        .collect()
}

fn numeric_totals(members: &[&Row], column: &str) -> (Option<f64>, Option<f64>) {
    let (sum, n) = members
        .iter()
        .filter_map(|row| row.get(column).and_then(Value::as_number))
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));

    if n == 0 {
        (None, None)
    } else {
        (Some(sum), Some(sum / n as f64))
    }
}
