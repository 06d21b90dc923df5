//! Core data model types.
//!
//! Parsing produces a sequence of [`Row`]s, each an insertion-ordered mapping from column name to
//! a typed [`Value`]. Transform parameters ([`FilterSpec`], [`SortSpec`]) and aggregation output
//! ([`AggregationResult`]) live here too so every layer shares one vocabulary.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A single typed cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value. Never produced by the parser; returned for absent cells.
    Null,
    /// Finite 64-bit float.
    Number(f64),
    /// Trimmed text (possibly empty).
    Text(String),
}

impl Value {
    /// Returns the numeric payload, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text payload, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Renders the value the way it is compared as a string: numbers in shortest round-trip form
/// (`25`, `2.5`), text verbatim, null as the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Logical type of a column, decided from the first row only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    String,
}

/// One parsed record: an insertion-ordered column name → value mapping.
///
/// Column names are unique within a row. Inserting an existing name overwrites its value but keeps
/// the column's original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, Value)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty row with room for `n` columns.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            cells: Vec::with_capacity(n),
        }
    }

    /// Set `column` to `value`, overwriting in place if the column already exists.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.cells.push((column, value)),
        }
    }

    /// Builder-style [`Row::insert`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Value of `column`, if present.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    /// `(column, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(name, v)| (name.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Comparison applied by a [`FilterSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    /// Numeric equality for numeric cells, case-insensitive string equality otherwise.
    #[default]
    Equals,
    /// Case-insensitive substring match on the cell's string form.
    Contains,
    /// Numeric `>`; never matches text cells.
    Greater,
    /// Numeric `<`; never matches text cells.
    Less,
}

/// Single-column row predicate.
///
/// An empty `column`, or a `value` that is empty after trimming, makes the filter a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    pub column: String,
    pub value: String,
    pub operator: FilterOperator,
}

impl FilterSpec {
    pub fn new(column: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
            operator,
        }
    }

    /// True when applying this filter returns its input unchanged.
    pub fn is_noop(&self) -> bool {
        self.column.is_empty() || self.value.trim().is_empty()
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Single-column ordering. An empty `column` makes the sort a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.column.is_empty()
    }

    /// The spec produced by clicking a column header: the current column flips asc → desc,
    /// anything else (including desc on the same column) restarts at asc.
    pub fn toggled(&self, column: &str) -> Self {
        let direction = if self.column == column && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self {
            column: column.to_owned(),
            direction,
        }
    }
}

/// Summary of one group produced by [`crate::processing::aggregate()`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Name of the column rows were grouped by.
    #[serde(rename = "groupBy")]
    pub group_by: String,
    /// The group key.
    pub value: Value,
    /// Number of member rows, regardless of the aggregate column's contents.
    pub count: usize,
    /// Total of the numeric aggregate values; absent when there were none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
    /// `sum` divided by the number of numeric values (not by `count`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_insert_overwrites_in_place() {
        let mut row = Row::new().with("a", 1.0).with("b", "x");
        row.insert("a", "later");

        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(row.get("a"), Some(&Value::Text("later".to_string())));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn value_display_uses_shortest_number_form() {
        assert_eq!(Value::Number(25.0).to_string(), "25");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Text("Ada".into()).to_string(), "Ada");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn sort_toggle_cycles_direction() {
        let none = SortSpec::default();
        let asc = none.toggled("age");
        assert_eq!(asc, SortSpec::ascending("age"));

        let desc = asc.toggled("age");
        assert_eq!(desc, SortSpec::descending("age"));

        assert_eq!(desc.toggled("age"), SortSpec::ascending("age"));
        assert_eq!(desc.toggled("name"), SortSpec::ascending("name"));
    }

    #[test]
    fn filter_noop_detection() {
        assert!(FilterSpec::default().is_noop());
        assert!(FilterSpec::new("name", FilterOperator::Equals, "   ").is_noop());
        assert!(FilterSpec::new("", FilterOperator::Contains, "a").is_noop());
        assert!(!FilterSpec::new("name", FilterOperator::Contains, "a").is_noop());
    }

    #[test]
    fn row_serializes_in_column_order() {
        let row = Row::new().with("Name", "John").with("Age", 25.0);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"Name":"John","Age":25.0}"#);
    }

    #[test]
    fn aggregation_result_omits_missing_totals() {
        let r = AggregationResult {
            group_by: "Department".to_string(),
            value: Value::Text("Sales".to_string()),
            count: 1,
            sum: None,
            average: None,
        };
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"groupBy":"Department","value":"Sales","count":1}"#);
    }

    #[test]
    fn specs_deserialize_from_lowercase_names() {
        let f: FilterSpec =
            serde_json::from_str(r#"{"column":"Age","value":"30","operator":"less"}"#).unwrap();
        assert_eq!(f, FilterSpec::new("Age", FilterOperator::Less, "30"));

        let s: SortSpec = serde_json::from_str(r#"{"column":"Name","direction":"desc"}"#).unwrap();
        assert_eq!(s, SortSpec::descending("Name"));
    }
}
