//! Row filtering by a single-column [`FilterSpec`].

use std::borrow::Cow;

use crate::numeric::number_prefix;
use crate::types::{FilterOperator, FilterSpec, Row, Value};

/// Returns the rows that satisfy `spec`.
///
/// A no-op spec (empty column, or blank value) returns `rows` itself as [`Cow::Borrowed`].
/// Otherwise a new sequence is built; `rows` is never modified.
///
/// The filter value is trimmed before comparison. Per operator:
///
/// - `Equals`: numeric cells compare exactly against the value's leading number (no number, no
///   match); text cells compare case-insensitively.
/// - `Contains`: case-insensitive substring test on the cell's string form, for any cell type.
/// - `Greater` / `Less`: numeric cells only; text cells never match.
///
/// Rows without the column (or with a null cell) never match.
pub fn filter<'a>(rows: &'a [Row], spec: &FilterSpec) -> Cow<'a, [Row]> {
    if spec.is_noop() {
        return Cow::Borrowed(rows);
    }

    let predicate = CellPredicate::new(spec);
    Cow::Owned(
        rows.iter()
            .filter(|row| predicate.matches(row.get(&spec.column)))
            .cloned()
            .collect(),
    )
}

/// A [`FilterSpec`] with its value pre-processed once for the whole scan.
struct CellPredicate {
    operator: FilterOperator,
    needle: String,
    number: Option<f64>,
}

impl CellPredicate {
    fn new(spec: &FilterSpec) -> Self {
        let trimmed = spec.value.trim();
        Self {
            operator: spec.operator,
            needle: trimmed.to_lowercase(),
            number: number_prefix(trimmed),
        }
    }

    fn matches(&self, cell: Option<&Value>) -> bool {
        let cell = match cell {
            None | Some(Value::Null) => return false,
            Some(v) => v,
        };

        match (self.operator, cell) {
            (FilterOperator::Equals, Value::Number(n)) => self.number.is_some_and(|f| *n == f),
            (FilterOperator::Equals, _) => cell.to_string().to_lowercase() == self.needle,
            (FilterOperator::Contains, _) => cell.to_string().to_lowercase().contains(&self.needle),
            (FilterOperator::Greater, Value::Number(n)) => self.number.is_some_and(|f| *n > f),
            (FilterOperator::Less, Value::Number(n)) => self.number.is_some_and(|f| *n < f),
            (FilterOperator::Greater | FilterOperator::Less, _) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::filter;
    use crate::types::{FilterOperator, FilterSpec, Row, Value};
    use std::borrow::Cow;

    fn staff() -> Vec<Row> {
        [
            ("John", 25.0, "Engineering", 75000.0),
            ("Jane", 30.0, "Marketing", 65000.0),
            ("Bob", 35.0, "Engineering", 85000.0),
            ("Alice", 28.0, "Sales", 60000.0),
            ("Charlie", 32.0, "Marketing", 70000.0),
        ]
        .into_iter()
        .map(|(name, age, dept, salary)| {
            Row::new()
                .with("Name", name)
                .with("Age", age)
                .with("Department", dept)
                .with("Salary", salary)
        })
        .collect()
    }

    fn names(rows: &[Row]) -> Vec<String> {
        rows.iter()
            .map(|r| r.get("Name").map(Value::to_string).unwrap_or_default())
            .collect()
    }

    #[test]
    fn equals_on_text_is_case_insensitive() {
        let rows = staff();
        let out = filter(
            &rows,
            &FilterSpec::new("Department", FilterOperator::Equals, "ENGINEERING"),
        );
        assert_eq!(names(&out), vec!["John", "Bob"]);
    }

    #[test]
    fn equals_trims_the_filter_value() {
        let rows = staff();
        let out = filter(
            &rows,
            &FilterSpec::new("Department", FilterOperator::Equals, "  Engineering  "),
        );
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn equals_on_numbers_is_exact() {
        let rows = staff();
        let out = filter(&rows, &FilterSpec::new("Age", FilterOperator::Equals, "30"));
        assert_eq!(names(&out), vec!["Jane"]);

        let out = filter(&rows, &FilterSpec::new("Age", FilterOperator::Equals, "thirty"));
        assert!(out.is_empty());
    }

    #[test]
    fn contains_matches_substrings() {
        let rows = staff();
        let out = filter(&rows, &FilterSpec::new("Name", FilterOperator::Contains, "a"));
        assert_eq!(names(&out), vec!["Jane", "Alice", "Charlie"]);
    }

    #[test]
    fn contains_works_on_numeric_cells_via_string_form() {
        let rows = staff();
        let out = filter(&rows, &FilterSpec::new("Salary", FilterOperator::Contains, "65"));
        assert_eq!(names(&out), vec!["Jane"]);
    }

    #[test]
    fn greater_and_less_compare_numbers() {
        let rows = staff();
        let out = filter(&rows, &FilterSpec::new("Salary", FilterOperator::Greater, "70000"));
        assert_eq!(names(&out), vec!["John", "Bob"]);

        let out = filter(&rows, &FilterSpec::new("Age", FilterOperator::Less, "30"));
        assert_eq!(names(&out), vec!["John", "Alice"]);
    }

    #[test]
    fn greater_and_less_never_match_text() {
        let rows = staff();
        let out = filter(&rows, &FilterSpec::new("Name", FilterOperator::Greater, "John"));
        assert!(out.is_empty());
        let out = filter(&rows, &FilterSpec::new("Name", FilterOperator::Less, "Zed"));
        assert!(out.is_empty());
    }

    #[test]
    fn noop_specs_borrow_the_input() {
        let rows = staff();
        let out = filter(&rows, &FilterSpec::default());
        assert!(matches!(out, Cow::Borrowed(_)));
        assert!(std::ptr::eq(out.as_ref(), rows.as_slice()));

        let out = filter(&rows, &FilterSpec::new("Name", FilterOperator::Equals, ""));
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn missing_column_matches_nothing() {
        let rows = staff();
        let out = filter(&rows, &FilterSpec::new("Nope", FilterOperator::Contains, "a"));
        assert!(out.is_empty());
        // Original unchanged
        assert_eq!(rows.len(), 5);
    }
}
